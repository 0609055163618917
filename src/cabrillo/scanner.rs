//! Line tokenizer for tagged Cabrillo lines.

use std::str::Lines;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::LineNumber;

static LINE_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z-]+):\s*(.*?)\s*$").expect("line tag regex"));

/// A recognized `TAG: data` line, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    /// 1-based source line.
    pub line: LineNumber,
    /// Raw tag, e.g. `CATEGORY-OPERATOR`.
    pub tag: String,
    /// Trimmed data after the colon.
    pub data: String,
}

/// Lazily yields the tagged lines of a document, dropping everything else.
pub struct LineScanner<'a> {
    lines: Lines<'a>,
    line_no: LineNumber,
}

impl<'a> LineScanner<'a> {
    /// Scans `text`, splitting on LF or CRLF.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_no: 0,
        }
    }
}

impl Iterator for LineScanner<'_> {
    type Item = TaggedLine;

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.lines.by_ref() {
            self.line_no += 1;
            let upper = raw.to_uppercase();
            match LINE_TAG_REGEX.captures(&upper) {
                Some(caps) => {
                    return Some(TaggedLine {
                        line: self.line_no,
                        tag: caps[1].to_string(),
                        data: caps[2].to_string(),
                    });
                }
                None => tracing::trace!(line = self.line_no, "dropping untagged line"),
            }
        }
        None
    }
}
