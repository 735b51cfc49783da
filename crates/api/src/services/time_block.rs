//! Time-block service: CRUD, statistics, and availability queries over the
//! time-block store, enforcing the scheduling invariants.
//!
//! Per block the state machine is `Free` (no appointments) to `Booked`
//! (one or more); booking happens elsewhere, this service only observes
//! the count. A booked block rejects update and delete with `Locked`.
//!
//! The conflict check and the subsequent insert/update are separate
//! statements; two concurrent creates can both pass the check before
//! either writes (see DESIGN.md).

use chrono::{Duration, Utc};
use sqlx::PgPool;

use agenda_core::errors::{AgendaError, AgendaResult, ConflictingBlock};
use agenda_core::models::appointment::AppointmentDetail;
use agenda_core::models::time_block::{
    AvailableRangeQuery, CreateTimeBlockRequest, ListTimeBlocksQuery, PageInfo, TimeBlock,
    TimeBlockDetail, TimeBlockSnapshot, TimeBlockStats, UpdateTimeBlockRequest,
};
use agenda_core::models::user::UserSummary;
use agenda_core::stats;
use agenda_core::validation::{day_bounds, parse_id, parse_timestamp};
use agenda_db::models::{DbAppointmentWithUser, DbTimeBlock, DbTimeBlockWithCount};
use agenda_db::repositories::time_block::{self as repo, TimeBlockFilter};
use agenda_db::repositories::appointment as appointment_repo;

fn to_block(db: DbTimeBlockWithCount) -> TimeBlock {
    TimeBlock {
        id: db.id,
        start_time: db.start_time,
        end_time: db.end_time,
        appointment_count: db.appointment_count,
    }
}

fn to_appointment(db: DbAppointmentWithUser) -> AppointmentDetail {
    AppointmentDetail {
        id: db.id,
        date: db.date,
        user: UserSummary {
            id: db.user_id,
            name: db.user_name,
            email: db.user_email,
        },
    }
}

fn conflict_error(block: DbTimeBlock) -> AgendaError {
    AgendaError::Conflict(ConflictingBlock {
        id: block.id,
        start_time: block.start_time,
        end_time: block.end_time,
    })
}

fn not_found(id: i64) -> AgendaError {
    AgendaError::NotFound(format!("No time block with id {id}"))
}

async fn detail_for(pool: &PgPool, block: DbTimeBlockWithCount) -> AgendaResult<TimeBlockDetail> {
    let appointments = appointment_repo::list_for_block(pool, block.id).await?;

    Ok(TimeBlockDetail {
        id: block.id,
        start_time: block.start_time,
        end_time: block.end_time,
        appointment_count: block.appointment_count,
        appointments: appointments.into_iter().map(to_appointment).collect(),
    })
}

/// Lists time blocks with optional day and availability filters, offset
/// paginated, ascending by start time.
pub async fn list(
    pool: &PgPool,
    query: &ListTimeBlocksQuery,
) -> AgendaResult<(Vec<TimeBlockDetail>, PageInfo)> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);
    let skip = i64::from(page - 1) * i64::from(limit);

    let day = match &query.date {
        Some(raw) => Some(day_bounds(raw)?),
        None => None,
    };

    // Only the literal strings "true"/"false" activate the filter.
    let available = match query.available.as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    };

    let filter = TimeBlockFilter { day, available };

    let blocks = repo::list_time_blocks(pool, &filter, skip, i64::from(limit)).await?;
    let total = repo::count_time_blocks(pool, &filter).await?;

    let mut items = Vec::with_capacity(blocks.len());
    for block in blocks {
        items.push(detail_for(pool, block).await?);
    }

    Ok((items, PageInfo::new(page, limit, total)))
}

/// Fetches one block with its appointments.
pub async fn get_by_id(pool: &PgPool, raw_id: &str) -> AgendaResult<TimeBlockDetail> {
    let id = parse_id(raw_id)?;

    let block = repo::get_time_block(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    detail_for(pool, block).await
}

/// Creates a block after validating the timestamps and checking for
/// overlap with every stored block.
pub async fn create(pool: &PgPool, request: &CreateTimeBlockRequest) -> AgendaResult<TimeBlock> {
    let (start_raw, end_raw) = match (&request.start_time, &request.end_time) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AgendaError::MissingFields(
                "startTime and endTime are required".to_string(),
            ))
        }
    };

    let start = parse_timestamp("startTime", start_raw)?;
    let end = parse_timestamp("endTime", end_raw)?;

    if end <= start {
        return Err(AgendaError::InvalidRange);
    }

    if let Some(conflicting) = repo::find_conflicting(pool, start, end, None).await? {
        return Err(conflict_error(conflicting));
    }

    let created = repo::create_time_block(pool, start, end).await?;

    Ok(TimeBlock {
        id: created.id,
        start_time: created.start_time,
        end_time: created.end_time,
        appointment_count: 0,
    })
}

/// Updates the provided fields of a free block. A block with any
/// appointments is immutable regardless of the payload.
pub async fn update(
    pool: &PgPool,
    raw_id: &str,
    request: &UpdateTimeBlockRequest,
) -> AgendaResult<TimeBlock> {
    let id = parse_id(raw_id)?;

    let existing = repo::get_time_block(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if existing.appointment_count > 0 {
        return Err(AgendaError::Locked {
            appointments: existing.appointment_count,
        });
    }

    let new_start = match &request.start_time {
        Some(raw) => Some(parse_timestamp("startTime", raw)?),
        None => None,
    };
    let new_end = match &request.end_time {
        Some(raw) => Some(parse_timestamp("endTime", raw)?),
        None => None,
    };

    // The effective range merges provided fields with the stored block.
    let effective_start = new_start.unwrap_or(existing.start_time);
    let effective_end = new_end.unwrap_or(existing.end_time);

    if effective_end <= effective_start {
        return Err(AgendaError::InvalidRange);
    }

    if new_start.is_some() || new_end.is_some() {
        if let Some(conflicting) =
            repo::find_conflicting(pool, effective_start, effective_end, Some(id)).await?
        {
            return Err(conflict_error(conflicting));
        }
    }

    let updated = repo::update_time_block(pool, id, new_start, new_end).await?;

    Ok(TimeBlock {
        id: updated.id,
        start_time: updated.start_time,
        end_time: updated.end_time,
        appointment_count: 0,
    })
}

/// Deletes a free block, returning its pre-deletion snapshot.
pub async fn delete(pool: &PgPool, raw_id: &str) -> AgendaResult<TimeBlockSnapshot> {
    let id = parse_id(raw_id)?;

    let existing = repo::get_time_block(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if existing.appointment_count > 0 {
        return Err(AgendaError::Locked {
            appointments: existing.appointment_count,
        });
    }

    repo::delete_time_block(pool, id).await?;

    Ok(TimeBlockSnapshot {
        id: existing.id,
        start_time: existing.start_time,
        end_time: existing.end_time,
    })
}

/// Occupancy statistics over all blocks plus the upcoming seven days.
pub async fn get_stats(pool: &PgPool) -> AgendaResult<TimeBlockStats> {
    let total = repo::count_total(pool).await?;
    let occupied = repo::count_occupied(pool).await?;

    let now = Utc::now();
    let next_week = now + Duration::days(7);
    let upcoming: Vec<TimeBlock> = repo::list_starting_between(pool, now, next_week)
        .await?
        .into_iter()
        .map(to_block)
        .collect();

    Ok(TimeBlockStats {
        general: stats::general_stats(total, occupied),
        upcoming_week: stats::upcoming_week_stats(&upcoming),
    })
}

/// True iff the block exists and has no appointments.
pub async fn is_available(pool: &PgPool, raw_id: &str) -> AgendaResult<bool> {
    let id = parse_id(raw_id)?;

    let block = repo::get_time_block(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(block.appointment_count == 0)
}

/// All appointment-free blocks starting within `[startDate, endDate]`,
/// ascending by start time.
pub async fn list_available_in_range(
    pool: &PgPool,
    query: &AvailableRangeQuery,
) -> AgendaResult<Vec<TimeBlock>> {
    let (start_raw, end_raw) = match (&query.start_date, &query.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AgendaError::MissingFields(
                "startDate and endDate are required".to_string(),
            ))
        }
    };

    let start = parse_timestamp("startDate", start_raw)?;
    let end = parse_timestamp("endDate", end_raw)?;

    if end <= start {
        return Err(AgendaError::InvalidRange);
    }

    let blocks = repo::list_available_between(pool, start, end).await?;

    Ok(blocks.into_iter().map(to_block).collect())
}
