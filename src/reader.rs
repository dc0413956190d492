//! Document-level reading using lopdf
//!
//! Loads a whole document from a binary stream and exposes page count,
//! trailer `/Info` metadata and plain text per page.

use crate::PdfError;
use lopdf::{Document, Object};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Document metadata from the trailer `/Info` dictionary, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Key (without the leading slash) and rendered value
    pub entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a value by key, e.g. `"Title"`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A fully loaded document, read from a byte stream
pub struct DocumentReader {
    doc: Document,
}

impl DocumentReader {
    /// Build a reader over any binary stream
    pub fn from_reader<R: Read>(source: R) -> Result<Self, PdfError> {
        let doc = Document::load_from(source)?;
        log::debug!("reader: loaded {} objects", doc.objects.len());
        Ok(Self { doc })
    }

    /// Open a file and read it; the file handle is closed before returning
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build a reader from a memory buffer
    pub fn from_mem(buffer: &[u8]) -> Result<Self, PdfError> {
        let doc = Document::load_mem(buffer)?;
        Ok(Self { doc })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Number of the first page in the page tree, if there is one
    pub fn first_page_number(&self) -> Option<u32> {
        self.doc.get_pages().keys().next().copied()
    }

    /// Read the `/Info` dictionary. A document without one yields empty metadata.
    pub fn metadata(&self) -> Result<Metadata, PdfError> {
        let info = match self.doc.trailer.get(b"Info") {
            Ok(obj) => obj,
            Err(_) => return Ok(Metadata::default()),
        };

        let dict = match info {
            Object::Reference(id) => self.doc.get_dictionary(*id)?,
            Object::Dictionary(dict) => dict,
            _ => return Err(PdfError::InvalidStructure),
        };

        let entries = dict
            .iter()
            .map(|(key, value)| {
                (
                    String::from_utf8_lossy(key).into_owned(),
                    render_value(&self.doc, value, true),
                )
            })
            .collect();

        Ok(Metadata { entries })
    }

    /// Extract plain text from a page (1-indexed)
    pub fn page_text(&self, page_number: u32) -> Result<String, PdfError> {
        if !self.doc.get_pages().contains_key(&page_number) {
            return Err(PdfError::PageNotFound(page_number));
        }

        self.doc
            .extract_text(&[page_number])
            .map_err(|e| PdfError::Parse(e.to_string()))
    }
}

/// Render a metadata value for display. References are followed once.
fn render_value(doc: &Document, obj: &Object, follow_refs: bool) -> String {
    match obj {
        Object::String(bytes, _) => decode_text_string(bytes),
        Object::Name(name) => format!("/{}", String::from_utf8_lossy(name)),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => r.to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Null => "null".to_string(),
        Object::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| render_value(doc, item, follow_refs))
                .collect();
            format!("[{}]", parts.join(", "))
        }
        Object::Reference(id) if follow_refs => match doc.get_object(*id) {
            Ok(target) => render_value(doc, target, false),
            Err(_) => format!("{} {} R", id.0, id.1),
        },
        Object::Reference(id) => format!("{} {} R", id.0, id.1),
        other => format!("{:?}", other),
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, then UTF-8, then Latin-1
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
