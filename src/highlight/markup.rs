//! Markup rendering
//!
//! Splices open/close placeholders into the text at boundary offsets, then
//! escapes the user text and finally swaps placeholders for real tags.
//! Placeholders are tokens in a stream rather than marker strings, so
//! nothing the user types can be mistaken for one.

use std::borrow::Cow;

use super::boundary::{Boundary, BoundaryKind};

/// Tag wrapped around every highlighted range
pub const MARK_TAG: &str = "mark";

/// A rewrite applied to escaped user text just before tags are substituted.
///
/// This is where environment-specific compensation hooks in.
pub trait TextTransform {
    fn apply(&self, text: &str) -> String;
}

impl<F> TextTransform for F
where
    F: Fn(&str) -> String,
{
    fn apply(&self, text: &str) -> String {
        self(text)
    }
}

/// Lets a passive overlay wrap runs of spaces the way an editable text box
/// does, by offering a break opportunity after every space.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceWrap;

impl TextTransform for WhitespaceWrap {
    fn apply(&self, text: &str) -> String {
        text.replace(' ', " <wbr>")
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(Cow<'a, str>),
    /// Position of the start boundary in the sorted list
    Open(usize),
    Close,
}

/// Render `text` with a tag pair around each range described by `boundaries`.
///
/// `boundaries` must come from [`build`](super::boundary::build): sorted by
/// descending offset, with offsets on char boundaries of `text`.
pub fn render(text: &str, boundaries: &[Boundary], transform: Option<&dyn TextTransform>) -> String {
    let mut tokens = splice(text, boundaries);
    pad_trailing_break(&mut tokens);

    let mut out = String::with_capacity(text.len() + boundaries.len() * 8);
    for token in &tokens {
        match token {
            Token::Text(chunk) => {
                let escaped = escape(chunk);
                match transform {
                    Some(transform) => out.push_str(&transform.apply(&escaped)),
                    None => out.push_str(&escaped),
                }
            }
            Token::Open(position) => {
                let class_name = boundaries
                    .get(*position)
                    .and_then(|b| b.class_name.as_deref())
                    .filter(|c| !c.is_empty());
                push_open_tag(&mut out, class_name);
            }
            Token::Close => {
                out.push_str("</");
                out.push_str(MARK_TAG);
                out.push('>');
            }
        }
    }
    out
}

/// Insert a token for every boundary, right to left.
///
/// Offsets are visited in descending order, so everything to the right of
/// the current offset is already final and the part still being split is
/// always a prefix of the original text. A token placed at an offset that
/// already has tokens lands to their left.
fn splice<'a>(text: &'a str, boundaries: &[Boundary]) -> Vec<Token<'a>> {
    let mut reversed = Vec::with_capacity(boundaries.len() * 2 + 1);
    let mut remaining = text;

    for (position, boundary) in boundaries.iter().enumerate() {
        let at = char_floor(remaining, boundary.index);
        let (head, tail) = remaining.split_at(at);
        if !tail.is_empty() {
            reversed.push(Token::Text(Cow::Borrowed(tail)));
        }
        reversed.push(match boundary.kind {
            BoundaryKind::Start => Token::Open(position),
            BoundaryKind::Stop => Token::Close,
        });
        remaining = head;
    }
    if !remaining.is_empty() {
        reversed.push(Token::Text(Cow::Borrowed(remaining)));
    }

    reversed.reverse();
    reversed
}

/// A trailing line break shows an extra empty line in an editable text box
/// but not in a plain block, so double it. One trailing close tag may sit
/// after the break.
fn pad_trailing_break(tokens: &mut [Token<'_>]) {
    let text_idx = match &*tokens {
        [.., Token::Text(_), Token::Close] => tokens.len() - 2,
        [.., Token::Text(_)] => tokens.len() - 1,
        _ => return,
    };
    if let Token::Text(chunk) = &mut tokens[text_idx] {
        if chunk.ends_with('\n') {
            chunk.to_mut().push('\n');
        }
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

fn push_open_tag(out: &mut String, class_name: Option<&str>) {
    out.push('<');
    out.push_str(MARK_TAG);
    if let Some(class_name) = class_name {
        out.push_str(" class=\"");
        out.push_str(&class_name.replace('"', "&quot;"));
        out.push('"');
    }
    out.push('>');
}

/// Clamp `pos` into `text` and back it up to a char boundary
fn char_floor(text: &str, pos: usize) -> usize {
    let mut p = pos.min(text.len());
    while p > 0 && !text.is_char_boundary(p) {
        p -= 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::boundary::build;
    use crate::highlight::range::Range;

    fn mark(text: &str, ranges: Vec<Range>) -> String {
        render(text, &build(ranges), None)
    }

    #[test]
    fn test_no_boundaries() {
        assert_eq!(render("a < b", &[], None), "a &lt; b");
        assert_eq!(render("", &[], None), "");
    }

    #[test]
    fn test_simple_marks() {
        let out = mark("cat dog cat", vec![Range::new(0, 3), Range::new(8, 11)]);
        assert_eq!(out, "<mark>cat</mark> dog <mark>cat</mark>");
    }

    #[test]
    fn test_class_attribute() {
        let out = mark("hello", vec![Range::new(0, 5).with_class("warn")]);
        assert_eq!(out, r#"<mark class="warn">hello</mark>"#);
    }

    #[test]
    fn test_class_quotes_escaped() {
        let out = mark("hi", vec![Range::new(0, 2).with_class("a\"b")]);
        assert_eq!(out, r#"<mark class="a&quot;b">hi</mark>"#);
    }

    #[test]
    fn test_touching_ranges_close_before_open() {
        let out = mark(
            "abcde",
            vec![Range::new(0, 3).with_class("a"), Range::new(3, 5).with_class("b")],
        );
        assert_eq!(out, r#"<mark class="a">abc</mark><mark class="b">de</mark>"#);
    }

    #[test]
    fn test_nested_ranges() {
        let out = mark("abcdef", vec![Range::new(0, 6), Range::new(2, 4).with_class("in")]);
        assert_eq!(out, r#"<mark>ab<mark class="in">cd</mark>ef</mark>"#);
    }

    #[test]
    fn test_shared_start_widest_outermost() {
        let out = mark(
            "abcde",
            vec![Range::new(0, 3).with_class("short"), Range::new(0, 5).with_class("long")],
        );
        assert_eq!(
            out,
            r#"<mark class="long"><mark class="short">abc</mark>de</mark>"#
        );
    }

    #[test]
    fn test_escapes_content_not_tags() {
        let out = mark("a<b", vec![Range::new(0, 3)]);
        assert_eq!(out, "<mark>a&lt;b</mark>");

        let out = mark("<x> & y", vec![Range::new(1, 2)]);
        assert_eq!(out, "&lt;<mark>x</mark>&gt; & y");
    }

    #[test]
    fn test_user_text_that_looks_like_a_tag() {
        let out = mark("</mark>", vec![Range::new(2, 6)]);
        assert_eq!(out, "&lt;/<mark>mark</mark>&gt;");
    }

    #[test]
    fn test_trailing_break_doubled() {
        assert_eq!(render("abc\n", &[], None), "abc\n\n");
        assert_eq!(render("abc\nd", &[], None), "abc\nd");
    }

    #[test]
    fn test_trailing_break_before_close_tag() {
        let out = mark("ab\n", vec![Range::new(1, 3)]);
        assert_eq!(out, "a<mark>b\n\n</mark>");

        let out = mark("ab\n", vec![Range::new(2, 3)]);
        assert_eq!(out, "ab<mark>\n\n</mark>");
    }

    #[test]
    fn test_trailing_break_two_close_tags_untouched() {
        let out = mark("ab\n", vec![Range::new(0, 3), Range::new(1, 3)]);
        assert_eq!(out, "<mark>a<mark>b\n</mark></mark>");
    }

    #[test]
    fn test_transform_runs_after_escape() {
        let out = render("a b<c", &build(vec![Range::new(0, 1)]), Some(&WhitespaceWrap));
        assert_eq!(out, "<mark>a</mark> <wbr>b&lt;c");

        let upper = |text: &str| text.to_uppercase();
        let out = render("a<b", &build(vec![Range::new(2, 3)]), Some(&upper));
        assert_eq!(out, "A&LT;<mark>B</mark>");
    }

    #[test]
    fn test_multibyte_offsets() {
        // "né" is bytes 0..3
        let out = mark("né!", vec![Range::new(1, 3)]);
        assert_eq!(out, "n<mark>é</mark>!");
    }
}
