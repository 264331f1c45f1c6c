//! Editable surfaces
//!
//! The highlighter never edits text. It only reads the current content and
//! scroll position of whatever surface the user types into.

/// Scroll position of a surface, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub top: u32,
    pub left: u32,
}

impl ScrollOffset {
    pub fn new(top: u32, left: u32) -> Self {
        Self { top, left }
    }
}

/// Something the user edits text in
pub trait Surface {
    /// Full current content
    fn text(&self) -> String;

    /// Current scroll position
    fn scroll(&self) -> ScrollOffset;
}

/// An in-memory surface
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    text: String,
    scroll: ScrollOffset,
}

impl TextSurface {
    /// Create a surface holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scroll: ScrollOffset::default(),
        }
    }

    /// Replace the content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Move the scroll position
    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    /// Borrow the content
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Surface for TextSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn scroll(&self) -> ScrollOffset {
        self.scroll
    }
}

impl From<String> for TextSurface {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for TextSurface {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_surface() {
        let mut surface = TextSurface::new("one");
        assert_eq!(surface.text(), "one");
        assert_eq!(surface.scroll(), ScrollOffset::default());

        surface.set_text("two");
        surface.set_scroll(ScrollOffset::new(40, 8));
        assert_eq!(surface.as_str(), "two");
        assert_eq!(surface.scroll(), ScrollOffset { top: 40, left: 8 });
    }
}
