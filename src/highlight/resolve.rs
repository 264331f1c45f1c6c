//! Range resolution
//!
//! Turns a `HighlightSpec` plus the current text into raw ranges. Ranges
//! come out in spec order, not sorted, and may overlap.

use super::range::Range;
use super::spec::{HighlightSpec, Pattern};
use crate::error::Result;

/// Resolve `spec` against `text`.
///
/// Only a computed spec can fail, either by returning an error itself or
/// by producing a spec that fails to resolve.
pub fn resolve(text: &str, spec: &HighlightSpec) -> Result<Vec<Range>> {
    match spec {
        HighlightSpec::Empty => Ok(Vec::new()),
        HighlightSpec::Literal(needle) => Ok(literal_ranges(text, needle)),
        HighlightSpec::Pattern(pattern) => Ok(pattern_ranges(text, pattern)),
        HighlightSpec::Range { start, end } => Ok(vec![Range::new(*start, *end)]),
        HighlightSpec::Computed(computed) => {
            let produced = computed.call(text)?;
            resolve(text, &produced)
        }
        HighlightSpec::List(items) => {
            let mut ranges = Vec::new();
            for item in items {
                ranges.extend(resolve(text, item)?);
            }
            Ok(ranges)
        }
        HighlightSpec::Styled { inner, class_name } => {
            let mut ranges = resolve(text, inner)?;
            if !class_name.is_empty() {
                for range in &mut ranges {
                    range.add_outer_class(class_name);
                }
            }
            Ok(ranges)
        }
    }
}

/// Every non-overlapping, case-insensitive occurrence of `needle`
fn literal_ranges(text: &str, needle: &str) -> Vec<Range> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        match match_len_at(&text[pos..], &needle) {
            Some(len) => {
                ranges.push(Range::new(pos, pos + len));
                pos += len;
            }
            None => {
                // Skip one whole char
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    ranges
}

/// Byte length of the match of `needle` at the start of `haystack`, if any
fn match_len_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for &expected in needle {
        let (_, actual) = chars.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(idx, _)| idx))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn pattern_ranges(text: &str, pattern: &Pattern) -> Vec<Range> {
    let to_range = |m: regex::Match<'_>| Range::new(m.start(), m.end());
    if pattern.is_global() {
        pattern.regex().find_iter(text).map(to_range).collect()
    } else {
        pattern.regex().find(text).map(to_range).into_iter().collect()
    }
}
