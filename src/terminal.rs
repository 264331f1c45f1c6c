//! Terminal preview using crossterm
//!
//! Paints text with its highlighted ranges styled in place, as an
//! alternative to emitting markup. Nested ranges show the innermost style.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use tracing::warn;

use crate::error::Result;
use crate::highlight::{build, BoundaryKind, Range};

/// Terminal colors per class name
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: HashMap<String, Color>,
}

impl Palette {
    /// Build a palette from color names such as "red" or "dark_cyan".
    ///
    /// Unknown names are logged and skipped.
    pub fn from_names(names: &HashMap<String, String>) -> Self {
        let mut colors = HashMap::new();
        for (class_name, name) in names {
            match Color::try_from(name.as_str()) {
                Ok(color) => {
                    colors.insert(class_name.clone(), color);
                }
                Err(()) => warn!(class_name = %class_name, color = %name, "unknown color"),
            }
        }
        Self { colors }
    }

    /// Color for a space separated class list; the last class with a color
    /// wins, matching inner-most-last ordering.
    pub fn lookup(&self, class_name: &str) -> Option<Color> {
        class_name
            .split_whitespace()
            .rev()
            .find_map(|class| self.colors.get(class).copied())
    }
}

/// Paints highlighted text to a writer
pub struct Preview<W: Write> {
    out: W,
    palette: Palette,
}

impl<W: Write> Preview<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self { out, palette }
    }

    /// Write `text` with `ranges` styled.
    ///
    /// `ranges` must already be fitted to `text` and reduced.
    pub fn paint(&mut self, text: &str, ranges: Vec<Range>) -> Result<()> {
        let mut boundaries = build(ranges);
        // Ascending order; at a shared offset stops now come before starts
        boundaries.reverse();

        let mut active: Vec<Option<String>> = Vec::new();
        let mut pos = 0;
        for boundary in boundaries {
            if boundary.index > pos {
                queue!(self.out, Print(&text[pos..boundary.index]))?;
                pos = boundary.index;
            }
            match boundary.kind {
                BoundaryKind::Start => active.push(boundary.class_name),
                BoundaryKind::Stop => {
                    active.pop();
                }
            }
            self.set_style(active.last())?;
        }
        if pos < text.len() {
            queue!(self.out, Print(&text[pos..]))?;
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        Ok(())
    }

    /// Style for the innermost active range, or plain text when none
    fn set_style(&mut self, innermost: Option<&Option<String>>) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        let Some(class_name) = innermost else {
            return Ok(());
        };
        match class_name.as_deref().and_then(|c| self.palette.lookup(c)) {
            Some(color) => {
                queue!(
                    self.out,
                    SetBackgroundColor(color),
                    SetForegroundColor(Color::Black)
                )?;
            }
            None => {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
        }
        Ok(())
    }

    /// Hand back the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}
