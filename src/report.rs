//! Two-phase font diagnostics report
//!
//! The reader phase reports page count, metadata and a first-page text
//! preview from the lopdf document reader. The glyph phase reports the same
//! page count, a text preview and font name/size statistics sampled from the
//! first page's pdfplumber glyph records.
//!
//! A backend failure ends only its own phase: it is printed as a single
//! `"<label> error: <message>"` line and the next phase still runs. The
//! labels are part of the output format and stay fixed whatever backend
//! serves the phase.

use crate::glyphs::GlyphDocument;
use crate::reader::DocumentReader;
use crate::stats::FontStats;
use crate::PdfError;
use std::io::{self, Write};
use std::path::Path;

/// File analysed when no path is given
pub const DEFAULT_PDF_PATH: &str = "good-fonts.pdf";

/// Label for failures of the document reader phase
pub const READER_LABEL: &str = "PyPDF2";
/// Label for failures of the glyph phase
pub const GLYPH_LABEL: &str = "pdfplumber";

/// Limits and formatting for the report
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Characters of first-page text shown by the reader phase (default: 500)
    pub reader_preview_chars: usize,
    /// Characters of first-page text shown by the glyph phase (default: 300)
    pub glyph_preview_chars: usize,
    /// Glyph records examined for font statistics (default: 100)
    pub char_sample_limit: usize,
    /// Glyph records printed in detail (default: 5)
    pub char_detail_limit: usize,
    /// Width of the `=` rule between phases (default: 50)
    pub separator_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reader_preview_chars: 500,
            glyph_preview_chars: 300,
            char_sample_limit: 100,
            char_detail_limit: 5,
            separator_width: 50,
        }
    }
}

/// Failure inside a single phase
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The PDF backend failed; the phase is abandoned
    #[error(transparent)]
    Pdf(#[from] PdfError),
    /// The report could not be written
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// A backend failure tagged with the phase it ended
#[derive(Debug, thiserror::Error)]
#[error("{label} error: {source}")]
pub struct PhaseError {
    pub label: &'static str,
    #[source]
    pub source: PdfError,
}

/// Run both phases against `path`, writing the report to `out`
///
/// Backend failures are reported inline and never returned; the only error
/// is a failure to write to `out`.
pub fn analyze_pdf_fonts<P: AsRef<Path>, W: Write>(
    path: P,
    config: &ReportConfig,
    out: &mut W,
) -> io::Result<()> {
    let path = path.as_ref();
    writeln!(out, "Analyzing PDF: {}\n", path.display())?;

    run_phase(READER_LABEL, out, |out| {
        report_reader_phase(path, config, out)
    })?;

    writeln!(out, "\n{}\n", "=".repeat(config.separator_width))?;

    run_phase(GLYPH_LABEL, out, |out| {
        report_glyph_phase(path, config, out)
    })?;

    Ok(())
}

fn run_phase<W, F>(label: &'static str, out: &mut W, phase: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W) -> Result<(), ReportError>,
{
    match phase(out) {
        Ok(()) => Ok(()),
        Err(ReportError::Pdf(source)) => {
            let err = PhaseError { label, source };
            log::warn!("{}", err);
            writeln!(out, "{}", err)
        }
        Err(ReportError::Output(e)) => Err(e),
    }
}

/// Page count, metadata and first-page text from the document reader
pub fn report_reader_phase<W: Write>(
    path: &Path,
    config: &ReportConfig,
    out: &mut W,
) -> Result<(), ReportError> {
    log::debug!("reader phase: {}", path.display());
    let reader = DocumentReader::open(path)?;

    let page_count = reader.page_count();
    writeln!(out, "Number of pages: {}", page_count)?;

    let metadata = reader.metadata()?;
    if !metadata.is_empty() {
        writeln!(out, "\nPDF Metadata:")?;
        for (key, value) in metadata.iter() {
            writeln!(out, "  /{}: {}", key, value)?;
        }
    }

    if let Some(first) = reader.first_page_number() {
        let text = reader.page_text(first)?;
        writeln!(
            out,
            "\nFirst {} characters of text:\n{}...",
            config.reader_preview_chars,
            preview(&text, config.reader_preview_chars)
        )?;
    }

    Ok(())
}

/// Page count, text preview and font statistics from pdfplumber glyph records
pub fn report_glyph_phase<W: Write>(
    path: &Path,
    config: &ReportConfig,
    out: &mut W,
) -> Result<(), ReportError> {
    log::debug!("glyph phase: {}", path.display());
    let doc = GlyphDocument::open(path)?;

    writeln!(out, "PDF opened with pdfplumber")?;
    writeln!(out, "Number of pages: {}", doc.page_count())?;

    let Some(page) = doc.first_page()? else {
        return Ok(());
    };

    if let Some(text) = page.extract_text() {
        writeln!(
            out,
            "\nExtracted text preview (first {} chars):",
            config.glyph_preview_chars
        )?;
        writeln!(out, "{}...", preview(text, config.glyph_preview_chars))?;
    }

    let chars = page.chars();
    if chars.is_empty() {
        return Ok(());
    }

    let stats = FontStats::collect(chars, config.char_sample_limit);
    writeln!(out, "\nUnique fonts found: {}", stats.font_names_display())?;
    writeln!(out, "Font sizes found: {}", stats.font_sizes_display())?;

    writeln!(
        out,
        "\nSample character details (first {}):",
        config.char_detail_limit
    )?;
    for (i, ch) in chars.iter().take(config.char_detail_limit).enumerate() {
        writeln!(
            out,
            "  Char {}: '{}' - Font: {} - Size: {}",
            i,
            ch.text.as_deref().unwrap_or(""),
            ch.fontname.as_deref().unwrap_or("N/A"),
            ch.size
                .map(|s| format!("{:?}", s))
                .unwrap_or_else(|| "N/A".to_string())
        )?;
    }

    Ok(())
}

/// The first `max_chars` characters of `text` (all of it if shorter)
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_config_default() {
        let config = ReportConfig::default();
        assert_eq!(config.reader_preview_chars, 500);
        assert_eq!(config.glyph_preview_chars, 300);
        assert_eq!(config.char_sample_limit, 100);
        assert_eq!(config.char_detail_limit, 5);
        assert_eq!(config.separator_width, 50);
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 500), "short");
        assert_eq!(preview("", 300), "");
    }

    #[test]
    fn test_phase_error_display() {
        let err = PhaseError {
            label: READER_LABEL,
            source: PdfError::Parse("bad xref".to_string()),
        };
        assert_eq!(err.to_string(), "PyPDF2 error: PDF parsing error: bad xref");
    }

    #[test]
    fn test_run_phase_prints_backend_failure() {
        let mut out = Vec::new();
        run_phase(GLYPH_LABEL, &mut out, |_| {
            Err(ReportError::Pdf(PdfError::InvalidStructure))
        })
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pdfplumber error: Invalid PDF structure\n"
        );
    }

    #[test]
    fn test_glyph_backend_message_kept_verbatim() {
        let source = PdfError::from(pdfplumber::PdfError::IoError(
            "No such file or directory".to_string(),
        ));
        let err = PhaseError {
            label: GLYPH_LABEL,
            source,
        };
        assert_eq!(
            err.to_string(),
            "pdfplumber error: I/O error: No such file or directory"
        );
    }

    #[test]
    fn test_run_phase_propagates_output_failure() {
        let mut out = Vec::new();
        let result = run_phase(READER_LABEL, &mut out, |_| {
            Err(ReportError::Output(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "closed",
            )))
        });
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
