use super::{AdifFields, EOH, EOR, tokenize, tokenizer::strip_type_suffixes};

/// Iterates over the record spans of an ADIF document.
///
/// Everything up to and including the first `<EOH>` is discarded. Each
/// yielded span is the trimmed text before the next `<EOR>`; text after the
/// last `<EOR>` is ignored. Both markers match case-insensitively.
#[derive(Debug, Clone)]
pub struct RecordSplitter<'a> {
    body: &'a str,
    pos: usize,
    seen: usize,
}

impl<'a> RecordSplitter<'a> {
    /// Creates a splitter over a whole-file buffer.
    pub fn new(text: &'a str) -> Self {
        let body = match find_marker(text, EOH) {
            Some(at) => &text[at + EOH.len()..],
            None => text,
        };
        Self {
            body,
            pos: 0,
            seen: 0,
        }
    }

    /// Number of record spans yielded so far.
    pub fn records_seen(&self) -> usize {
        self.seen
    }
}

impl<'a> Iterator for RecordSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.body[self.pos..];
        let at = find_marker(rest, EOR)?;
        self.pos += at + EOR.len();
        self.seen += 1;
        Some(rest[..at].trim())
    }
}

/// Preprocesses, splits and tokenizes a whole document, in file order.
pub fn parse_records(text: &str) -> Vec<AdifFields> {
    let text = strip_type_suffixes(text);
    RecordSplitter::new(&text).map(tokenize).collect()
}

// Markers are ASCII, so a byte match always starts on a char boundary.
fn find_marker(haystack: &str, marker: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(marker.len())
        .position(|window| window.eq_ignore_ascii_case(marker.as_bytes()))
}
