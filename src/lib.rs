//! highlight-within - highlight text behind an editable surface
//!
//! The text itself is never modified. A highlight spec is resolved against
//! the current text into ranges, staggered ranges are dropped, and the rest
//! are rendered as `<mark>` markup for an overlay drawn behind the surface.
//!
//! ```
//! use highlight_within::{Highlighter, HighlightSpec, TextSurface};
//!
//! let spec = HighlightSpec::styled(HighlightSpec::literal("cat"), "pet");
//! let highlighter = Highlighter::new(TextSurface::new("cat dog"), spec);
//! assert_eq!(
//!     highlighter.overlay().markup(),
//!     r#"<mark class="pet">cat</mark> dog"#
//! );
//! ```

pub mod config;
pub mod error;
pub mod highlight;
pub mod highlighter;
pub mod surface;
pub mod terminal;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use highlight::{highlight, HighlightSpec, Pattern, Range, TextTransform, WhitespaceWrap};
pub use highlighter::{Highlighter, Overlay};
pub use surface::{ScrollOffset, Surface, TextSurface};
