use std::borrow::Cow;

use super::AdifFields;

/// Extracts `(TAG, value)` pairs from one record span.
///
/// A `<TAG:N>` marker with a positive `N` takes `N` characters after the
/// `>`; when those stop inside a word the value runs on to the end of that
/// word, so an undercounted `<CALL:5>N0CALL` still reads `N0CALL`. A bare
/// `<TAG>`, or one whose length does not parse as a positive integer, takes
/// everything up to the next `<`. Values are trimmed, tags are
/// upper-cased and the last occurrence of a tag wins. A `<` without a closing
/// `>` ends the scan, keeping what was read so far.
pub fn tokenize(span: &str) -> AdifFields {
    let mut fields = AdifFields::new();
    let mut pos = 0;

    while let Some(open) = span[pos..].find('<').map(|i| pos + i) {
        let Some(close) = span[open..].find('>').map(|i| open + i) else {
            break;
        };

        let (tag, length) = parse_marker(&span[open + 1..close]);
        pos = close + 1;

        let end = match length {
            Some(n) => finish_word(span, pos, advance_chars(span, pos, n)),
            None => span[pos..].find('<').map_or(span.len(), |i| pos + i),
        };
        fields.insert(tag, span[pos..end].trim().to_string());
        pos = end;
    }

    fields
}

/// Rewrites legacy type-suffixed markers `<QSO_DATE:n:D>` and `<TIME_ON:n:T>`
/// into plain `TAG:n` form. Borrows when nothing needed rewriting.
pub fn strip_type_suffixes(text: &str) -> Cow<'_, str> {
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut pos = 0;

    while let Some(open) = text[pos..].find('<').map(|i| pos + i) {
        let Some(close) = text[open..].find('>').map(|i| open + i) else {
            break;
        };
        if let Some(plain) = strip_known_suffix(&text[open + 1..close]) {
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[copied..=open]);
            buf.push_str(plain);
            copied = close;
        }
        pos = close + 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

fn parse_marker(body: &str) -> (String, Option<usize>) {
    match body.split_once(':') {
        None => (body.to_uppercase(), None),
        Some((tag, len)) => {
            let length = len.trim().parse::<usize>().ok().filter(|n| *n > 0);
            (tag.to_uppercase(), length)
        }
    }
}

// Byte offset `n` characters past `start`, clamped to the end of `text`.
fn advance_chars(text: &str, start: usize, n: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| start + i)
}

fn finish_word(text: &str, start: usize, end: usize) -> usize {
    let inside_word = text[start..end]
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace());
    if !inside_word {
        return end;
    }
    text[end..]
        .find(|c: char| c.is_whitespace() || c == '<')
        .map_or(text.len(), |i| end + i)
}

fn strip_known_suffix(body: &str) -> Option<&str> {
    let (head, kind) = body.rsplit_once(':')?;
    let (tag, _len) = head.split_once(':')?;
    let known = (tag.eq_ignore_ascii_case("QSO_DATE") && kind.eq_ignore_ascii_case("D"))
        || (tag.eq_ignore_ascii_case("TIME_ON") && kind.eq_ignore_ascii_case("T"));
    known.then_some(head)
}
