//! Service-level decision tests against mock repositories.
//!
//! The wrappers below mirror the service layer's decision sequence over the
//! repository trait surface, so the validation, conflict, and lock rules can
//! be exercised without a live database.

use chrono::{DateTime, TimeZone, Utc};
use mockall::predicate;

use agenda_core::errors::{AgendaError, AgendaResult, ConflictingBlock};
use agenda_core::models::time_block::{
    CreateTimeBlockRequest, TimeBlock, TimeBlockSnapshot, UpdateTimeBlockRequest,
};
use agenda_core::validation::parse_timestamp;
use agenda_db::mock::repositories::MockTimeBlockRepo;
use agenda_db::models::DbTimeBlock;

struct TestContext {
    time_block_repo: MockTimeBlockRepo,
}

impl TestContext {
    fn new() -> Self {
        Self {
            time_block_repo: MockTimeBlockRepo::new(),
        }
    }
}

fn ts(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, h, m, 0).unwrap()
}

fn db_block(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> DbTimeBlock {
    DbTimeBlock {
        id,
        start_time: start,
        end_time: end,
        created_at: ts(8, 0),
    }
}

/// Mirrors the create flow: field presence, timestamp parsing, range order,
/// conflict probe, insert.
async fn create_time_block_wrapper(
    ctx: &TestContext,
    request: CreateTimeBlockRequest,
) -> AgendaResult<TimeBlock> {
    let (Some(raw_start), Some(raw_end)) = (request.start_time, request.end_time) else {
        return Err(AgendaError::MissingFields(
            "startTime and endTime are required".to_string(),
        ));
    };

    let start = parse_timestamp("startTime", &raw_start)?;
    let end = parse_timestamp("endTime", &raw_end)?;
    if end <= start {
        return Err(AgendaError::InvalidRange);
    }

    if let Some(existing) = ctx
        .time_block_repo
        .find_conflicting(start, end, None)
        .await
        .map_err(AgendaError::Database)?
    {
        return Err(AgendaError::Conflict(ConflictingBlock {
            id: existing.id,
            start_time: existing.start_time,
            end_time: existing.end_time,
        }));
    }

    let created = ctx
        .time_block_repo
        .create_time_block(start, end)
        .await
        .map_err(AgendaError::Database)?;

    Ok(TimeBlock {
        id: created.id,
        start_time: created.start_time,
        end_time: created.end_time,
        appointment_count: 0,
    })
}

/// Mirrors the update flow: existence, lock, merge with the stored range,
/// conflict probe excluding the block itself.
async fn update_time_block_wrapper(
    ctx: &TestContext,
    id: i64,
    request: UpdateTimeBlockRequest,
) -> AgendaResult<TimeBlock> {
    let existing = ctx
        .time_block_repo
        .get_time_block(id)
        .await
        .map_err(AgendaError::Database)?
        .ok_or_else(|| AgendaError::NotFound(format!("Time block {} not found", id)))?;

    if existing.appointment_count > 0 {
        return Err(AgendaError::Locked {
            appointments: existing.appointment_count,
        });
    }

    let new_start = request
        .start_time
        .as_deref()
        .map(|raw| parse_timestamp("startTime", raw))
        .transpose()?;
    let new_end = request
        .end_time
        .as_deref()
        .map(|raw| parse_timestamp("endTime", raw))
        .transpose()?;

    let effective_start = new_start.unwrap_or(existing.start_time);
    let effective_end = new_end.unwrap_or(existing.end_time);
    if effective_end <= effective_start {
        return Err(AgendaError::InvalidRange);
    }

    if new_start.is_some() || new_end.is_some() {
        if let Some(other) = ctx
            .time_block_repo
            .find_conflicting(effective_start, effective_end, Some(id))
            .await
            .map_err(AgendaError::Database)?
        {
            return Err(AgendaError::Conflict(ConflictingBlock {
                id: other.id,
                start_time: other.start_time,
                end_time: other.end_time,
            }));
        }
    }

    let updated = ctx
        .time_block_repo
        .update_time_block(id, new_start, new_end)
        .await
        .map_err(AgendaError::Database)?;

    Ok(TimeBlock {
        id: updated.id,
        start_time: updated.start_time,
        end_time: updated.end_time,
        appointment_count: 0,
    })
}

/// Mirrors the delete flow: existence, lock, snapshot of the removed block.
async fn delete_time_block_wrapper(ctx: &TestContext, id: i64) -> AgendaResult<TimeBlockSnapshot> {
    let existing = ctx
        .time_block_repo
        .get_time_block(id)
        .await
        .map_err(AgendaError::Database)?
        .ok_or_else(|| AgendaError::NotFound(format!("Time block {} not found", id)))?;

    if existing.appointment_count > 0 {
        return Err(AgendaError::Locked {
            appointments: existing.appointment_count,
        });
    }

    ctx.time_block_repo
        .delete_time_block(id)
        .await
        .map_err(AgendaError::Database)?;

    Ok(TimeBlockSnapshot {
        id: existing.id,
        start_time: existing.start_time,
        end_time: existing.end_time,
    })
}

fn with_count(
    id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    appointment_count: i64,
) -> agenda_db::models::DbTimeBlockWithCount {
    agenda_db::models::DbTimeBlockWithCount {
        id,
        start_time: start,
        end_time: end,
        created_at: ts(8, 0),
        appointment_count,
    }
}

#[tokio::test]
async fn create_requires_both_timestamps() {
    let ctx = TestContext::new();

    let result = create_time_block_wrapper(
        &ctx,
        CreateTimeBlockRequest {
            start_time: Some("2024-06-10T09:00:00Z".to_string()),
            end_time: None,
        },
    )
    .await;

    assert!(matches!(result, Err(AgendaError::MissingFields(_))));
}

#[tokio::test]
async fn create_rejects_unparseable_timestamp() {
    let ctx = TestContext::new();

    let result = create_time_block_wrapper(
        &ctx,
        CreateTimeBlockRequest {
            start_time: Some("next tuesday".to_string()),
            end_time: Some("2024-06-10T10:00:00Z".to_string()),
        },
    )
    .await;

    match result {
        Err(AgendaError::InvalidDate(msg)) => assert!(msg.contains("startTime")),
        other => panic!("Expected InvalidDate, got: {:?}", other),
    }
}

#[tokio::test]
async fn create_rejects_inverted_range() {
    let ctx = TestContext::new();

    let result = create_time_block_wrapper(
        &ctx,
        CreateTimeBlockRequest {
            start_time: Some("2024-06-10T11:00:00Z".to_string()),
            end_time: Some("2024-06-10T10:00:00Z".to_string()),
        },
    )
    .await;

    assert!(matches!(result, Err(AgendaError::InvalidRange)));
}

#[tokio::test]
async fn create_reports_the_conflicting_block() {
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_find_conflicting()
        .times(1)
        .returning(|_, _, _| Ok(Some(db_block(3, ts(9, 30), ts(10, 30)))));

    let result = create_time_block_wrapper(
        &ctx,
        CreateTimeBlockRequest {
            start_time: Some("2024-06-10T09:00:00Z".to_string()),
            end_time: Some("2024-06-10T10:00:00Z".to_string()),
        },
    )
    .await;

    match result {
        Err(AgendaError::Conflict(block)) => {
            assert_eq!(block.id, 3);
            assert_eq!(block.start_time, ts(9, 30));
        }
        other => panic!("Expected Conflict, got: {:?}", other),
    }
}

#[tokio::test]
async fn create_succeeds_when_interval_is_free() {
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_find_conflicting()
        .with(
            predicate::eq(ts(9, 0)),
            predicate::eq(ts(10, 0)),
            predicate::eq(None),
        )
        .times(1)
        .returning(|_, _, _| Ok(None));
    ctx.time_block_repo
        .expect_create_time_block()
        .times(1)
        .returning(|start, end| Ok(db_block(1, start, end)));

    let block = create_time_block_wrapper(
        &ctx,
        CreateTimeBlockRequest {
            start_time: Some("2024-06-10T09:00:00Z".to_string()),
            end_time: Some("2024-06-10T10:00:00Z".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(block.id, 1);
    assert_eq!(block.start_time, ts(9, 0));
    assert_eq!(block.appointment_count, 0);
}

#[tokio::test]
async fn adjacent_blocks_do_not_conflict() {
    // [09:00, 10:00) followed by [10:00, 11:00) share only the boundary.
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_find_conflicting()
        .with(
            predicate::eq(ts(10, 0)),
            predicate::eq(ts(11, 0)),
            predicate::eq(None),
        )
        .times(1)
        .returning(|_, _, _| Ok(None));
    ctx.time_block_repo
        .expect_create_time_block()
        .times(1)
        .returning(|start, end| Ok(db_block(2, start, end)));

    let block = create_time_block_wrapper(
        &ctx,
        CreateTimeBlockRequest {
            start_time: Some("2024-06-10T10:00:00Z".to_string()),
            end_time: Some("2024-06-10T11:00:00Z".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(block.id, 2);
}

#[tokio::test]
async fn update_unknown_block_is_not_found() {
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_get_time_block()
        .with(predicate::eq(42))
        .times(1)
        .returning(|_| Ok(None));

    let result = update_time_block_wrapper(&ctx, 42, UpdateTimeBlockRequest::default()).await;
    assert!(matches!(result, Err(AgendaError::NotFound(_))));
}

#[tokio::test]
async fn update_of_booked_block_is_locked() {
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_get_time_block()
        .times(1)
        .returning(|id| Ok(Some(with_count(id, ts(9, 0), ts(10, 0), 2))));

    let result = update_time_block_wrapper(
        &ctx,
        5,
        UpdateTimeBlockRequest {
            start_time: Some("2024-06-10T12:00:00Z".to_string()),
            end_time: None,
        },
    )
    .await;

    match result {
        Err(AgendaError::Locked { appointments }) => assert_eq!(appointments, 2),
        other => panic!("Expected Locked, got: {:?}", other),
    }
}

#[tokio::test]
async fn update_merges_with_stored_range() {
    // Only endTime is provided; the stored startTime completes the range
    // checked against the rest of the schedule.
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_get_time_block()
        .times(1)
        .returning(|id| Ok(Some(with_count(id, ts(9, 0), ts(10, 0), 0))));
    ctx.time_block_repo
        .expect_find_conflicting()
        .with(
            predicate::eq(ts(9, 0)),
            predicate::eq(ts(11, 0)),
            predicate::eq(Some(5)),
        )
        .times(1)
        .returning(|_, _, _| Ok(None));
    ctx.time_block_repo
        .expect_update_time_block()
        .times(1)
        .returning(|id, start, end| {
            Ok(db_block(id, start.unwrap_or_else(|| ts(9, 0)), end.unwrap()))
        });

    let block = update_time_block_wrapper(
        &ctx,
        5,
        UpdateTimeBlockRequest {
            start_time: None,
            end_time: Some("2024-06-10T11:00:00Z".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(block.end_time, ts(11, 0));
}

#[tokio::test]
async fn update_rejects_merged_inverted_range() {
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_get_time_block()
        .times(1)
        .returning(|id| Ok(Some(with_count(id, ts(9, 0), ts(10, 0), 0))));

    // Moving the start past the stored end inverts the merged range.
    let result = update_time_block_wrapper(
        &ctx,
        5,
        UpdateTimeBlockRequest {
            start_time: Some("2024-06-10T10:30:00Z".to_string()),
            end_time: None,
        },
    )
    .await;

    assert!(matches!(result, Err(AgendaError::InvalidRange)));
}

#[tokio::test]
async fn delete_of_booked_block_is_locked() {
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_get_time_block()
        .times(1)
        .returning(|id| Ok(Some(with_count(id, ts(9, 0), ts(10, 0), 1))));

    let result = delete_time_block_wrapper(&ctx, 9).await;
    assert!(matches!(
        result,
        Err(AgendaError::Locked { appointments: 1 })
    ));
}

#[tokio::test]
async fn delete_returns_a_snapshot_of_the_removed_block() {
    let mut ctx = TestContext::new();

    ctx.time_block_repo
        .expect_get_time_block()
        .times(1)
        .returning(|id| Ok(Some(with_count(id, ts(9, 0), ts(10, 0), 0))));
    ctx.time_block_repo
        .expect_delete_time_block()
        .with(predicate::eq(9))
        .times(1)
        .returning(|_| Ok(()));

    let snapshot = delete_time_block_wrapper(&ctx, 9).await.unwrap();
    assert_eq!(
        snapshot,
        TimeBlockSnapshot {
            id: 9,
            start_time: ts(9, 0),
            end_time: ts(10, 0),
        }
    );
}
