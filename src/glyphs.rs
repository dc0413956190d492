//! Character-level glyph records using pdfplumber
//!
//! [`GlyphDocument`] wraps a pdfplumber document for the lifetime of the
//! handle. Pages are interpreted once, on access, and their characters are
//! mapped to [`CharRecord`]s.

use crate::PdfError;
use pdfplumber::{Char, Pdf, TextOptions};
use std::path::Path;

/// A single glyph as painted on the page
///
/// `text`, `fontname` and `size` are optional: a backend that leaves a field
/// blank produces `None` rather than an empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharRecord {
    pub text: Option<String>,
    /// Font name as reported by the backend (usually `/BaseFont`)
    pub fontname: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Left edge, top-left origin
    pub x0: f64,
    /// Top edge, top-left origin
    pub top: f64,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl CharRecord {
    fn from_char(ch: &Char, page_number: u32) -> Self {
        Self {
            text: non_empty(&ch.text),
            fontname: non_empty(&ch.fontname),
            size: ch.size.is_finite().then_some(ch.size),
            x0: ch.bbox.x0,
            top: ch.bbox.top,
            page_number,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// A document opened for glyph analysis
///
/// The whole file is read when the handle is created; dropping it releases
/// the document on every exit path.
pub struct GlyphDocument {
    pdf: Pdf,
}

impl GlyphDocument {
    /// Open and parse a PDF file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfError> {
        let pdf = Pdf::open_file(path.as_ref(), None)?;
        log::debug!("glyph document opened: {}", path.as_ref().display());
        Ok(Self { pdf })
    }

    /// Parse a PDF from a memory buffer
    pub fn from_mem(buffer: &[u8]) -> Result<Self, PdfError> {
        let pdf = Pdf::open(buffer, None)?;
        Ok(Self { pdf })
    }

    pub fn page_count(&self) -> u32 {
        self.pdf.page_count() as u32
    }

    /// Interpret a page by number (1-indexed)
    pub fn page(&self, page_number: u32) -> Result<GlyphPage, PdfError> {
        if page_number == 0 || page_number > self.page_count() {
            return Err(PdfError::PageNotFound(page_number));
        }
        let page = self.pdf.page(page_number as usize - 1)?;
        let chars: Vec<CharRecord> = page
            .chars()
            .iter()
            .map(|ch| CharRecord::from_char(ch, page_number))
            .collect();
        log::trace!("page {}: {} glyphs", page_number, chars.len());

        Ok(GlyphPage {
            page_number,
            text: page.extract_text(&TextOptions::default()),
            chars,
        })
    }

    /// The first page, or `None` for a document without pages
    pub fn first_page(&self) -> Result<Option<GlyphPage>, PdfError> {
        if self.page_count() == 0 {
            return Ok(None);
        }
        self.page(1).map(Some)
    }
}

impl Drop for GlyphDocument {
    fn drop(&mut self) {
        log::debug!("glyph document released ({} pages)", self.pdf.page_count());
    }
}

/// One interpreted page of a [`GlyphDocument`]
#[derive(Debug, Clone)]
pub struct GlyphPage {
    page_number: u32,
    text: String,
    chars: Vec<CharRecord>,
}

impl GlyphPage {
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// All glyphs on the page, Form XObject content included
    pub fn chars(&self) -> &[CharRecord] {
        &self.chars
    }

    /// Plain text laid out from the page's glyphs; `None` when the page has no text
    pub fn extract_text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfplumber::BBox;

    fn plumber_char(text: &str, fontname: &str, size: f64) -> Char {
        Char {
            text: text.to_string(),
            bbox: BBox::new(72.0, 80.0, 79.0, 92.0),
            fontname: fontname.to_string(),
            size,
            doctop: 80.0,
            upright: true,
            direction: Default::default(),
            stroking_color: None,
            non_stroking_color: None,
            ctm: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            char_code: 65,
            mcid: None,
            tag: None,
        }
    }

    #[test]
    fn test_record_from_char() {
        let rec = CharRecord::from_char(&plumber_char("A", "Helvetica", 12.0), 1);
        assert_eq!(rec.text.as_deref(), Some("A"));
        assert_eq!(rec.fontname.as_deref(), Some("Helvetica"));
        assert_eq!(rec.size, Some(12.0));
        assert_eq!(rec.x0, 72.0);
        assert_eq!(rec.top, 80.0);
        assert_eq!(rec.page_number, 1);
    }

    #[test]
    fn test_blank_fields_become_none() {
        let rec = CharRecord::from_char(&plumber_char("", "", f64::NAN), 2);
        assert_eq!(rec.text, None);
        assert_eq!(rec.fontname, None);
        assert_eq!(rec.size, None);
    }
}
