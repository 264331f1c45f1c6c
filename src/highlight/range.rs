//! Highlight ranges
//!
//! A range is a half-open `[start, end)` byte interval into one text
//! snapshot, optionally tagged with a style class.

/// A highlighted span of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    /// Byte offset where this range starts (inclusive)
    pub start: usize,
    /// Byte offset where this range ends (exclusive)
    pub end: usize,
    /// Space separated class names, outermost first
    pub class_name: Option<String>,
}

impl Range {
    /// Create an unstyled range
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            class_name: None,
        }
    }

    /// Builder: attach a class name
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Merge an enclosing class name into this range.
    ///
    /// The outer class goes first so nested wrappers read outer-to-inner.
    pub fn add_outer_class(&mut self, class_name: &str) {
        self.class_name = Some(match self.class_name.take() {
            Some(inner) => format!("{} {}", class_name, inner),
            None => class_name.to_string(),
        });
    }

    /// Get the length of this range in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if range is empty (reversed ranges count as empty)
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if `pos` lies strictly inside the open interval `(start, end)`
    pub fn strictly_contains(&self, pos: usize) -> bool {
        pos > self.start && pos < self.end
    }

    /// True if exactly one endpoint of `other` falls strictly inside `self`
    pub fn staggers(&self, other: &Range) -> bool {
        self.strictly_contains(other.start) != self.strictly_contains(other.end)
    }

    /// Clamp this range onto `text` so it can be spliced safely.
    ///
    /// Offsets past the end clamp to the text length, offsets inside a
    /// multi-byte character widen to the whole character, and a reversed
    /// range collapses to an empty range at its start.
    pub fn fit_to(mut self, text: &str) -> Self {
        let start = floor_char_boundary(text, self.start);
        let end = ceil_char_boundary(text, self.end);
        self.start = start;
        self.end = end.max(start);
        self
    }
}

/// Find the nearest valid UTF-8 char boundary at or before `pos`
fn floor_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    while p > 0 && !text.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Find the nearest valid UTF-8 char boundary at or after `pos`
fn ceil_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    while p < text.len() && !text.is_char_boundary(p) {
        p += 1;
    }
    p
}
