//! Font usage statistics over a sample of glyph records

use crate::glyphs::CharRecord;
use std::collections::BTreeSet;
use std::fmt;

/// A font size rounded to one decimal place, stored as tenths of a point
///
/// Sizes that round to the same tenth compare equal, so a set of
/// `RoundedSize` keeps one member per distinct rounded value, ordered
/// ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundedSize(i64);

impl RoundedSize {
    /// Round to the nearest tenth, ties to even, judged on the exact value
    /// of `size` (so `12.25` gives `12.2` but `0.15`, stored just below the
    /// tie, gives `0.1`)
    pub fn from_points(size: f64) -> Self {
        let scaled = size * 10.0;
        // Rounding error of the product
        let residual = size.mul_add(10.0, -scaled);
        let tenths = if scaled.fract().abs() == 0.5 && residual != 0.0 {
            if residual > 0.0 {
                scaled.ceil()
            } else {
                scaled.floor()
            }
        } else {
            scaled.round_ties_even()
        };
        RoundedSize(tenths as i64)
    }

    pub fn tenths(self) -> i64 {
        self.0
    }

    pub fn as_points(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for RoundedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_points())
    }
}

/// Distinct font names and rounded sizes seen in a glyph sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStats {
    pub font_names: BTreeSet<String>,
    pub font_sizes: BTreeSet<RoundedSize>,
    /// Number of records examined
    pub sampled: usize,
}

impl FontStats {
    /// Collect over at most the first `limit` records
    pub fn collect(chars: &[CharRecord], limit: usize) -> Self {
        let mut stats = FontStats::default();
        for ch in chars.iter().take(limit) {
            stats.add(ch);
        }
        stats
    }

    pub fn add(&mut self, ch: &CharRecord) {
        if let Some(name) = &ch.fontname {
            self.font_names.insert(name.clone());
        }
        if let Some(size) = ch.size {
            self.font_sizes.insert(RoundedSize::from_points(size));
        }
        self.sampled += 1;
    }

    /// Font names as a set literal: `{'Arial', 'Helvetica'}`, or `set()`
    pub fn font_names_display(&self) -> String {
        if self.font_names.is_empty() {
            return "set()".to_string();
        }
        let names: Vec<String> = self.font_names.iter().map(|n| quote(n)).collect();
        format!("{{{}}}", names.join(", "))
    }

    /// Sizes as an ascending list: `[10.0, 12.0]`
    pub fn font_sizes_display(&self) -> String {
        let sizes: Vec<String> = self.font_sizes.iter().map(|s| s.to_string()).collect();
        format!("[{}]", sizes.join(", "))
    }
}

/// Quoted string literal: single quotes unless the text holds a single
/// quote and no double quote
fn quote(text: &str) -> String {
    let delim = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delim);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
