use crate::models::{DbAppointment, DbAppointmentWithUser};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    date: DateTime<Utc>,
    user_id: i64,
    time_block_id: i64,
) -> Result<DbAppointment> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (date, user_id, time_block_id)
        VALUES ($1, $2, $3)
        RETURNING id, date, user_id, time_block_id, created_at
        "#,
    )
    .bind(date)
    .bind(user_id)
    .bind(time_block_id)
    .fetch_one(pool)
    .await?;

    Ok(appointment)
}

/// Appointments for a block with the booking user resolved, as embedded in
/// time-block detail responses.
pub async fn list_for_block(
    pool: &Pool<Postgres>,
    time_block_id: i64,
) -> Result<Vec<DbAppointmentWithUser>> {
    let appointments = sqlx::query_as::<_, DbAppointmentWithUser>(
        r#"
        SELECT a.id, a.date, u.id AS user_id, u.name AS user_name, u.email AS user_email
        FROM appointments a
        JOIN users u ON u.id = a.user_id
        WHERE a.time_block_id = $1
        ORDER BY a.date ASC
        "#,
    )
    .bind(time_block_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn count_for_block(pool: &Pool<Postgres>, time_block_id: i64) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE time_block_id = $1")
            .bind(time_block_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Wipes all appointments; only the seeding binary calls this.
pub async fn delete_all_appointments(pool: &Pool<Postgres>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM appointments").execute(pool).await?;

    Ok(result.rows_affected())
}
