use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::UserSummary;

/// A booking of a user against a time block on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub user_id: i64,
    pub time_block_id: i64,
}

/// Appointment with its user resolved, embedded in time-block responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub user: UserSummary,
}
