//! Interval conflict detection over half-open time ranges.
//!
//! Two blocks `[s1, e1)` and `[s2, e2)` conflict when they are not
//! disjoint, i.e. `s1 < e2 && s2 < e1`. Blocks that merely touch at a
//! boundary (`e1 == s2`) do not conflict. The SQL in
//! `agenda-db::repositories::time_block` mirrors this predicate exactly;
//! this module is the in-memory reference implementation.

use chrono::{DateTime, Utc};

use crate::models::time_block::TimeBlock;

/// Unified half-open overlap test.
pub fn overlaps(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && start_b < end_a
}

/// Returns the first stored block whose interval overlaps `[start, end)`,
/// skipping `exclude_id` (the block being updated, so it cannot conflict
/// with itself). Read-only; callers validate `end > start` beforehand.
pub fn find_conflict(
    blocks: &[TimeBlock],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_id: Option<i64>,
) -> Option<&TimeBlock> {
    blocks
        .iter()
        .filter(|block| exclude_id != Some(block.id))
        .find(|block| overlaps(start, end, block.start_time, block.end_time))
}
