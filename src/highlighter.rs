//! Highlighter: ties a surface, a spec and an overlay together
//!
//! The environment calls `handle_input` on every content change and
//! `handle_scroll` on every scroll change. Each input pass fully rewrites
//! the overlay markup; a failed pass leaves the previous markup in place.

use toml::Value;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::Result;
use crate::highlight::{self, HighlightSpec, TextTransform, WhitespaceWrap};
use crate::surface::Surface;

/// The passive layer drawn behind the surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    markup: String,
    scroll_top: u32,
    shift_x: i64,
}

impl Overlay {
    /// Markup from the last successful pass
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Vertical scroll copied from the surface
    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Horizontal shift compensating the surface's horizontal scroll
    pub fn shift_x(&self) -> i64 {
        self.shift_x
    }

    /// CSS transform for the horizontal shift, if any
    pub fn transform(&self) -> Option<String> {
        (self.shift_x != 0).then(|| format!("translateX({}px)", self.shift_x))
    }
}

/// Keeps an overlay's markup in step with a surface's text
pub struct Highlighter<S: Surface> {
    surface: S,
    spec: HighlightSpec,
    transform: Option<Box<dyn TextTransform>>,
    overlay: Overlay,
}

impl<S: Surface> Highlighter<S> {
    /// Attach to `surface` and highlight its current content.
    ///
    /// If the first pass fails the overlay starts out empty; the error has
    /// already been logged.
    pub fn new(surface: S, spec: HighlightSpec) -> Self {
        Self::attach(surface, spec, None)
    }

    /// Attach using a spec in its TOML shape
    pub fn from_value(surface: S, value: &Value) -> Result<Self> {
        let spec = HighlightSpec::from_value(value).map_err(|e| {
            let e = e.into_configuration();
            error!(error = %e, "highlighter not created");
            e
        })?;
        Ok(Self::new(surface, spec))
    }

    /// Attach using the spec and options from a config
    pub fn from_config(surface: S, config: &Config) -> Self {
        let transform: Option<Box<dyn TextTransform>> = if config.whitespace_wrap {
            Some(Box::new(WhitespaceWrap))
        } else {
            None
        };
        Self::attach(surface, config.highlight.clone(), transform)
    }

    fn attach(surface: S, spec: HighlightSpec, transform: Option<Box<dyn TextTransform>>) -> Self {
        let mut highlighter = Self {
            surface,
            spec,
            transform,
            overlay: Overlay::default(),
        };
        let _ = highlighter.handle_input();
        highlighter.handle_scroll();
        highlighter
    }

    /// Register the transform applied to escaped text, then re-render
    pub fn with_transform(mut self, transform: impl TextTransform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        let _ = self.handle_input();
        self
    }

    /// Re-render the overlay from the surface's current text.
    ///
    /// On error the overlay keeps its previous markup.
    pub fn handle_input(&mut self) -> Result<&str> {
        let text = self.surface.text();
        match highlight::highlight(&text, &self.spec, self.transform.as_deref()) {
            Ok(markup) => {
                self.overlay.markup = markup;
                Ok(&self.overlay.markup)
            }
            Err(e) => {
                warn!(error = %e, "highlight pass aborted, overlay left unchanged");
                Err(e)
            }
        }
    }

    /// Copy the surface's scroll position onto the overlay
    pub fn handle_scroll(&mut self) {
        let scroll = self.surface.scroll();
        self.overlay.scroll_top = scroll.top;
        self.overlay.shift_x = -i64::from(scroll.left);
    }

    /// Current overlay state
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The highlight spec
    pub fn spec(&self) -> &HighlightSpec {
        &self.spec
    }

    /// Borrow the surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the surface; call `handle_input` after editing it
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Detach the overlay and hand back the surface
    pub fn destroy(self) -> S {
        debug!("highlighter detached");
        self.surface
    }
}
