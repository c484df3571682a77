//! Course queries.

use crate::error::{map_unique_violation, AppError};
use crate::models::{Course, CoursePayload};
use sqlx::PgPool;

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Course>, AppError> {
    let rows = sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY id LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Course>, AppError> {
    let row = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Course>, AppError> {
    let row = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Case-insensitive substring match on title.
pub async fn search_by_title(pool: &PgPool, title: &str) -> Result<Vec<Course>, AppError> {
    let rows = sqlx::query_as::<_, Course>(
        "SELECT * FROM courses WHERE title ILIKE '%' || $1 || '%' ORDER BY id",
    )
    .bind(title)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Courses with no capacity limit, or with fewer ENROLLED enrollments than
/// their limit.
pub async fn find_available(pool: &PgPool) -> Result<Vec<Course>, AppError> {
    let rows = sqlx::query_as::<_, Course>(
        "SELECT * FROM courses c \
         WHERE c.max_capacity IS NULL \
            OR c.max_capacity > (SELECT COUNT(*) FROM enrollments e \
                                 WHERE e.course_id = c.id AND e.status = 'ENROLLED') \
         ORDER BY c.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn exists_by_code(pool: &PgPool, code: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE code = $1)")
        .bind(code)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Fetch a course inside an open transaction, locking its row until commit.
/// Serializes concurrent enrollments against the same course so the capacity
/// count cannot go stale between check and insert.
pub async fn find_for_update_tx(
    conn: &mut sqlx::PgConnection,
    id: i64,
) -> Result<Option<Course>, AppError> {
    let row = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn insert(pool: &PgPool, payload: &CoursePayload) -> Result<Course, AppError> {
    let row = sqlx::query_as::<_, Course>(
        "INSERT INTO courses (title, code, description, credit_hours, max_capacity) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&payload.title)
    .bind(&payload.code)
    .bind(&payload.description)
    .bind(payload.credit_hours)
    .bind(payload.max_capacity)
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    payload: &CoursePayload,
) -> Result<Option<Course>, AppError> {
    let row = sqlx::query_as::<_, Course>(
        "UPDATE courses SET title = $2, code = $3, description = $4, \
         credit_hours = $5, max_capacity = $6 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&payload.title)
    .bind(&payload.code)
    .bind(&payload.description)
    .bind(payload.credit_hours)
    .bind(payload.max_capacity)
    .fetch_optional(pool)
    .await
    .map_err(map_unique_violation)?;
    Ok(row)
}

/// Delete a course; dependent enrollments go with it via the FK cascade.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let deleted = sqlx::query_scalar::<_, i64>("DELETE FROM courses WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(deleted.is_some())
}
