use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeBlock {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Time block row joined with its derived appointment count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeBlockWithCount {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub appointment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub user_id: i64,
    pub time_block_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Appointment row joined with its user's public fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentWithUser {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
}
