use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::appointment::AppointmentDetail;

/// A bookable interval `[start_time, end_time)`.
///
/// `appointment_count` is derived from the appointments referencing the
/// block; a block with a non-zero count is locked against update and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub appointment_count: i64,
}

/// A time block together with its appointments, as returned by list and
/// get-by-id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlockDetail {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub appointment_count: i64,
    pub appointments: Vec<AppointmentDetail>,
}

/// Snapshot of a block as it existed before deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlockSnapshot {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Body for `POST /api/admin/timeblocks`.
///
/// Timestamps arrive as raw strings so the service can distinguish a
/// missing field from an unparseable one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeBlockRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Body for `PUT /api/admin/timeblocks/:id`; both fields optional, the
/// effective range is the merge with the stored block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeBlockRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Query string for the list endpoint.
///
/// `available` is kept as a raw string: only the literal values `"true"`
/// and `"false"` activate the filter, anything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTimeBlocksQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub date: Option<String>,
    pub available: Option<String>,
}

/// Query string for the available-in-range endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Offset-pagination metadata returned alongside list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

impl PageInfo {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            (total + i64::from(limit) - 1) / i64::from(limit)
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

/// Occupancy breakdown over all blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStats {
    pub total: i64,
    pub occupied: i64,
    pub available: i64,
    pub occupancy_rate: f64,
}

/// Breakdown restricted to blocks starting within the next seven days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingWeekStats {
    pub total_blocks: i64,
    pub available_blocks: i64,
    pub occupied_blocks: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlockStats {
    pub general: GeneralStats,
    pub upcoming_week: UpcomingWeekStats,
}
