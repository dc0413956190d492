//! PDF font and text diagnostics
//!
//! This crate provides:
//! - A document reader (lopdf) for page count, metadata and first-page text
//! - Glyph records (pdfplumber) with per-character font name and size
//! - A two-phase console report combining both

pub mod glyphs;
pub mod reader;
pub mod report;
pub mod stats;

pub use glyphs::{CharRecord, GlyphDocument, GlyphPage};
pub use reader::{DocumentReader, Metadata};
pub use report::{
    analyze_pdf_fonts, report_glyph_phase, report_reader_phase, PhaseError, ReportConfig,
    ReportError, DEFAULT_PDF_PATH,
};
pub use stats::{FontStats, RoundedSize};

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Invalid PDF structure")]
    InvalidStructure,
    #[error("Page {0} not found")]
    PageNotFound(u32),
    #[error(transparent)]
    Glyph(#[from] pdfplumber::PdfError),
}

impl From<lopdf::Error> for PdfError {
    fn from(e: lopdf::Error) -> Self {
        PdfError::Parse(e.to_string())
    }
}
