//! Conflict reduction
//!
//! Overlapping highlights can only be tagged if they nest cleanly. Ranges
//! that stagger an earlier range are dropped; the first one seen wins.

use super::range::Range;

/// Drop staggered and empty ranges, keeping input order.
///
/// O(n²) in the number of ranges.
pub fn reduce(ranges: Vec<Range>) -> Vec<Range> {
    let mut accepted: Vec<Range> = Vec::with_capacity(ranges.len());
    for range in ranges {
        // An empty range would emit a close tag ahead of its open tag
        if range.is_empty() {
            continue;
        }
        if accepted.iter().any(|kept| kept.staggers(&range)) {
            continue;
        }
        accepted.push(range);
    }
    accepted
}
