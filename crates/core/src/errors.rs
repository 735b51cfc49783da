use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Summary of the stored block that overlaps a requested interval.
///
/// Attached to [`AgendaError::Conflict`] so callers can see exactly which
/// block blocked the create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingBlock {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Domain errors for the agenda service.
///
/// Every expected failure mode carries enough structured payload for the
/// transport layer to build its response without re-deriving anything.
/// The HTTP status mapping lives in `agenda-api`; this enum stays
/// transport-agnostic.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time range: end time must be after start time")]
    InvalidRange,

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Time block overlaps existing block {}", .0.id)]
    Conflict(ConflictingBlock),

    #[error("Time block has {appointments} associated appointment(s)")]
    Locked { appointments: i64 },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("A user with this email already exists")]
    EmailTaken,

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: role {role} is not permitted")]
    Authorization { role: String },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type AgendaResult<T> = Result<T, AgendaError>;
