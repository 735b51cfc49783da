use crate::models::{DbTimeBlock, DbTimeBlockWithCount};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres, QueryBuilder};

/// Filters applied by the admin list endpoint. `day` holds the inclusive
/// UTC bounds of a calendar day; `available` selects blocks with zero
/// (`true`) or at least one (`false`) appointment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeBlockFilter {
    pub day: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub available: Option<bool>,
}

const WITH_COUNT: &str = r#"
    SELECT tb.id, tb.start_time, tb.end_time, tb.created_at,
           (SELECT COUNT(*) FROM appointments a WHERE a.time_block_id = tb.id) AS appointment_count
    FROM time_blocks tb
"#;

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TimeBlockFilter) {
    builder.push(" WHERE TRUE");

    if let Some((day_start, day_end)) = filter.day {
        builder.push(" AND tb.start_time >= ");
        builder.push_bind(day_start);
        builder.push(" AND tb.start_time <= ");
        builder.push_bind(day_end);
    }

    match filter.available {
        Some(true) => {
            builder
                .push(" AND NOT EXISTS (SELECT 1 FROM appointments a WHERE a.time_block_id = tb.id)");
        }
        Some(false) => {
            builder.push(" AND EXISTS (SELECT 1 FROM appointments a WHERE a.time_block_id = tb.id)");
        }
        None => {}
    }
}

pub async fn list_time_blocks(
    pool: &Pool<Postgres>,
    filter: &TimeBlockFilter,
    skip: i64,
    limit: i64,
) -> Result<Vec<DbTimeBlockWithCount>> {
    let mut builder = QueryBuilder::new(WITH_COUNT);
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY tb.start_time ASC LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(skip);

    let blocks = builder
        .build_query_as::<DbTimeBlockWithCount>()
        .fetch_all(pool)
        .await?;

    Ok(blocks)
}

pub async fn count_time_blocks(pool: &Pool<Postgres>, filter: &TimeBlockFilter) -> Result<i64> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM time_blocks tb");
    push_filter(&mut builder, filter);

    let total: i64 = builder.build_query_scalar().fetch_one(pool).await?;

    Ok(total)
}

pub async fn get_time_block(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbTimeBlockWithCount>> {
    let block = sqlx::query_as::<_, DbTimeBlockWithCount>(&format!(
        "{WITH_COUNT} WHERE tb.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(block)
}

pub async fn create_time_block(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbTimeBlock> {
    let block = sqlx::query_as::<_, DbTimeBlock>(
        r#"
        INSERT INTO time_blocks (start_time, end_time)
        VALUES ($1, $2)
        RETURNING id, start_time, end_time, created_at
        "#,
    )
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await?;

    Ok(block)
}

/// Persists only the provided fields; `COALESCE` keeps the stored value for
/// any field passed as `None`.
pub async fn update_time_block(
    pool: &Pool<Postgres>,
    id: i64,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
) -> Result<DbTimeBlock> {
    let block = sqlx::query_as::<_, DbTimeBlock>(
        r#"
        UPDATE time_blocks
        SET start_time = COALESCE($2, start_time),
            end_time = COALESCE($3, end_time)
        WHERE id = $1
        RETURNING id, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await?;

    Ok(block)
}

pub async fn delete_time_block(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM time_blocks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Returns the lowest-id stored block overlapping `[start_time, end_time)`,
/// skipping `exclude_id` during updates. The predicate is the unified
/// half-open overlap test, the same one `agenda_core::conflict` implements
/// in memory.
pub async fn find_conflicting(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    exclude_id: Option<i64>,
) -> Result<Option<DbTimeBlock>> {
    let block = sqlx::query_as::<_, DbTimeBlock>(
        r#"
        SELECT id, start_time, end_time, created_at
        FROM time_blocks
        WHERE start_time < $2
          AND $1 < end_time
          AND ($3::BIGINT IS NULL OR id <> $3)
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(start_time)
    .bind(end_time)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;

    Ok(block)
}

pub async fn count_total(pool: &Pool<Postgres>) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM time_blocks")
        .fetch_one(pool)
        .await?;

    Ok(total)
}

pub async fn count_occupied(pool: &Pool<Postgres>) -> Result<i64> {
    let occupied: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM time_blocks tb
        WHERE EXISTS (SELECT 1 FROM appointments a WHERE a.time_block_id = tb.id)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(occupied)
}

/// Wipes all time blocks; only the seeding binary calls this.
pub async fn delete_all_time_blocks(pool: &Pool<Postgres>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM time_blocks").execute(pool).await?;

    Ok(result.rows_affected())
}

/// Blocks whose start falls in `[from, to]`, ascending; used by the
/// upcoming-week statistics.
pub async fn list_starting_between(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbTimeBlockWithCount>> {
    let blocks = sqlx::query_as::<_, DbTimeBlockWithCount>(&format!(
        "{WITH_COUNT} WHERE tb.start_time >= $1 AND tb.start_time <= $2 ORDER BY tb.start_time ASC"
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(blocks)
}

/// Zero-appointment blocks whose start falls in `[from, to]`, ascending.
pub async fn list_available_between(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbTimeBlockWithCount>> {
    let blocks = sqlx::query_as::<_, DbTimeBlockWithCount>(&format!(
        r#"{WITH_COUNT}
        WHERE tb.start_time >= $1 AND tb.start_time <= $2
          AND NOT EXISTS (SELECT 1 FROM appointments a WHERE a.time_block_id = tb.id)
        ORDER BY tb.start_time ASC"#
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(blocks)
}
