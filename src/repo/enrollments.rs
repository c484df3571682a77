//! Enrollment queries. The tx variants run inside the enroll transaction,
//! after `courses::find_for_update_tx` has locked the course row.

use crate::error::{map_unique_violation, AppError};
use crate::models::{Enrollment, EnrollmentStatus};
use sqlx::PgPool;

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Enrollment>, AppError> {
    let rows =
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments ORDER BY id LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Enrollment>, AppError> {
    let row = sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_student(pool: &PgPool, student_id: i64) -> Result<Vec<Enrollment>, AppError> {
    let rows =
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE student_id = $1 ORDER BY id")
            .bind(student_id)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn find_by_course(pool: &PgPool, course_id: i64) -> Result<Vec<Enrollment>, AppError> {
    let rows =
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE course_id = $1 ORDER BY id")
            .bind(course_id)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn find_by_status(
    pool: &PgPool,
    status: EnrollmentStatus,
) -> Result<Vec<Enrollment>, AppError> {
    let rows =
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE status = $1 ORDER BY id")
            .bind(status)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// Enrollments that have been graded.
pub async fn find_with_grades(pool: &PgPool) -> Result<Vec<Enrollment>, AppError> {
    let rows =
        sqlx::query_as::<_, Enrollment>("SELECT * FROM enrollments WHERE grade IS NOT NULL ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// Whether this (student, course) pair is already enrolled.
pub async fn exists_pair_tx(
    conn: &mut sqlx::PgConnection,
    student_id: i64,
    course_id: i64,
) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(conn)
    .await?;
    Ok(exists)
}

/// Count of ENROLLED enrollments for a course, for the capacity check.
pub async fn count_enrolled_tx(
    conn: &mut sqlx::PgConnection,
    course_id: i64,
) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrollments WHERE course_id = $1 AND status = 'ENROLLED'",
    )
    .bind(course_id)
    .fetch_one(conn)
    .await?;
    Ok(count)
}

/// Insert a new enrollment. `enrollment_date`, `created_at` and `updated_at`
/// take the column defaults; grade starts unset.
pub async fn insert_tx(
    conn: &mut sqlx::PgConnection,
    student_id: i64,
    course_id: i64,
    status: EnrollmentStatus,
) -> Result<Enrollment, AppError> {
    let row = sqlx::query_as::<_, Enrollment>(
        "INSERT INTO enrollments (student_id, course_id, status) \
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(student_id)
    .bind(course_id)
    .bind(status)
    .fetch_one(conn)
    .await
    .map_err(map_unique_violation)?;
    Ok(row)
}

/// Replace the status unconditionally; no transition restrictions apply.
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: EnrollmentStatus,
) -> Result<Option<Enrollment>, AppError> {
    let row = sqlx::query_as::<_, Enrollment>(
        "UPDATE enrollments SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Store the grade and its derived letter together, refreshing `updated_at`.
pub async fn update_grade(
    pool: &PgPool,
    id: i64,
    grade: Option<f64>,
    grade_letter: Option<&str>,
) -> Result<Option<Enrollment>, AppError> {
    let row = sqlx::query_as::<_, Enrollment>(
        "UPDATE enrollments SET grade = $2, grade_letter = $3, updated_at = NOW() \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(grade)
    .bind(grade_letter)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let deleted = sqlx::query_scalar::<_, i64>("DELETE FROM enrollments WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(deleted.is_some())
}
