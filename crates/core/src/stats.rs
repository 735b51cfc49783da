//! Availability statistics over time blocks.

use crate::models::time_block::{GeneralStats, TimeBlock, UpcomingWeekStats};

/// Occupancy as a percentage rounded to one decimal; `0.0` for an empty set.
pub fn occupancy_rate(occupied: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = occupied as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Builds the general breakdown from the store's total and occupied counts.
/// `available` is derived so `total == occupied + available` holds by
/// construction.
pub fn general_stats(total: i64, occupied: i64) -> GeneralStats {
    GeneralStats {
        total,
        occupied,
        available: total - occupied,
        occupancy_rate: occupancy_rate(occupied, total),
    }
}

/// Breakdown of the blocks starting within the upcoming week.
pub fn upcoming_week_stats(blocks: &[TimeBlock]) -> UpcomingWeekStats {
    let occupied = blocks
        .iter()
        .filter(|block| block.appointment_count > 0)
        .count() as i64;
    let total = blocks.len() as i64;

    UpcomingWeekStats {
        total_blocks: total,
        available_blocks: total - occupied,
        occupied_blocks: occupied,
    }
}
