//! Highlight pipeline
//!
//! Resolve a spec into ranges, drop staggered ranges, expand the survivors
//! into sorted boundaries and render them as markup:
//!
//! - `resolve`: spec + text -> raw ranges
//! - `reduce`: raw ranges -> nest-safe ranges
//! - `boundary`: ranges -> sorted start/stop boundaries
//! - `markup`: text + boundaries -> overlay markup

mod boundary;
mod markup;
mod range;
mod reduce;
mod resolve;
mod spec;

pub use boundary::{build, sort_boundaries, Boundary, BoundaryKind};
pub use markup::{render, TextTransform, WhitespaceWrap, MARK_TAG};
pub use range::Range;
pub use reduce::reduce;
pub use resolve::resolve;
pub use spec::{ComputeFn, Computed, HighlightSpec, Pattern};

use tracing::debug;

use crate::error::Result;

/// Resolve, fit and reduce: the ranges that will actually be tagged
pub fn ranges(text: &str, spec: &HighlightSpec) -> Result<Vec<Range>> {
    let resolved = resolve(text, spec)?;
    let resolved_count = resolved.len();
    let fitted = resolved.into_iter().map(|range| range.fit_to(text)).collect();
    let reduced = reduce(fitted);
    debug!(
        resolved = resolved_count,
        kept = reduced.len(),
        "resolved highlight ranges"
    );
    Ok(reduced)
}

/// Run the whole pipeline for one text snapshot.
///
/// A resolver error aborts the pass before anything is rendered.
pub fn highlight(
    text: &str,
    spec: &HighlightSpec,
    transform: Option<&dyn TextTransform>,
) -> Result<String> {
    let boundaries = build(ranges(text, spec)?);
    Ok(render(text, &boundaries, transform))
}
