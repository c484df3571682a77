//! Student queries.

use crate::error::{map_unique_violation, AppError};
use crate::models::{AcademicStatus, Student, StudentPayload};
use sqlx::PgPool;

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Student>, AppError> {
    let rows = sqlx::query_as::<_, Student>(
        "SELECT * FROM students ORDER BY id LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Student>, AppError> {
    let row = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Student>, AppError> {
    let row = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_student_id(
    pool: &PgPool,
    student_id: &str,
) -> Result<Option<Student>, AppError> {
    let row = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE student_id = $1")
        .bind(student_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Case-insensitive substring match on first or last name.
pub async fn search_by_name(pool: &PgPool, name: &str) -> Result<Vec<Student>, AppError> {
    let rows = sqlx::query_as::<_, Student>(
        "SELECT * FROM students \
         WHERE first_name ILIKE '%' || $1 || '%' OR last_name ILIKE '%' || $1 || '%' \
         ORDER BY id",
    )
    .bind(name)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_status(
    pool: &PgPool,
    status: AcademicStatus,
) -> Result<Vec<Student>, AppError> {
    let rows =
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE academic_status = $1 ORDER BY id")
            .bind(status)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM students WHERE email = $1)",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

pub async fn exists_by_student_id(pool: &PgPool, student_id: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)",
    )
    .bind(student_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Existence check usable inside an open transaction.
pub async fn exists_by_id_tx(
    conn: &mut sqlx::PgConnection,
    id: i64,
) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(exists)
}

/// Insert a new student. `enrollment_date` takes the column default (today);
/// a missing academic status defaults to ACTIVE.
pub async fn insert(pool: &PgPool, payload: &StudentPayload) -> Result<Student, AppError> {
    let row = sqlx::query_as::<_, Student>(
        "INSERT INTO students \
         (first_name, last_name, email, student_id, date_of_birth, phone_number, academic_status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.student_id)
    .bind(payload.date_of_birth)
    .bind(&payload.phone_number)
    .bind(payload.academic_status.unwrap_or(AcademicStatus::Active))
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)?;
    Ok(row)
}

/// Full update. An absent academic status leaves the stored one unchanged;
/// `enrollment_date` is never rewritten.
pub async fn update(
    pool: &PgPool,
    id: i64,
    payload: &StudentPayload,
) -> Result<Option<Student>, AppError> {
    let row = sqlx::query_as::<_, Student>(
        "UPDATE students SET \
         first_name = $2, last_name = $3, email = $4, student_id = $5, \
         date_of_birth = $6, phone_number = $7, \
         academic_status = COALESCE($8, academic_status) \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.student_id)
    .bind(payload.date_of_birth)
    .bind(&payload.phone_number)
    .bind(payload.academic_status)
    .fetch_optional(pool)
    .await
    .map_err(map_unique_violation)?;
    Ok(row)
}

/// Delete a student; dependent enrollments go with it via the FK cascade.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let deleted = sqlx::query_scalar::<_, i64>("DELETE FROM students WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(deleted.is_some())
}
