//! Range boundaries
//!
//! Each surviving range becomes a start and a stop boundary. Boundaries are
//! sorted so that the markup renderer can splice them right to left.

use super::range::Range;

/// Which end of a range a boundary marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BoundaryKind {
    Start,
    Stop,
}

/// A single start or stop point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    pub kind: BoundaryKind,
    /// Byte offset into the text
    pub index: usize,
    /// Class name of the range; only ever set on `Start`
    pub class_name: Option<String>,
}

impl Boundary {
    /// Create a start boundary
    pub fn start(index: usize, class_name: Option<String>) -> Self {
        Self {
            kind: BoundaryKind::Start,
            index,
            class_name,
        }
    }

    /// Create a stop boundary
    pub fn stop(index: usize) -> Self {
        Self {
            kind: BoundaryKind::Stop,
            index,
            class_name: None,
        }
    }

    pub fn is_start(&self) -> bool {
        self.kind == BoundaryKind::Start
    }
}

/// Expand ranges into sorted boundaries, two per range
pub fn build(ranges: Vec<Range>) -> Vec<Boundary> {
    let mut boundaries = Vec::with_capacity(ranges.len() * 2);
    for range in ranges {
        boundaries.push(Boundary::start(range.start, range.class_name));
        boundaries.push(Boundary::stop(range.end));
    }
    sort_boundaries(&mut boundaries);
    boundaries
}

/// Sort by descending offset, starts before stops at the same offset.
///
/// The renderer inserts each boundary to the left of anything already
/// inserted at the same offset, so starts sorted first come out after the
/// stops. That closes a range before opening one that touches it. The sort
/// is stable: equal boundaries keep input order.
pub fn sort_boundaries(boundaries: &mut [Boundary]) {
    boundaries.sort_by(|a, b| b.index.cmp(&a.index).then(a.kind.cmp(&b.kind)));
}
