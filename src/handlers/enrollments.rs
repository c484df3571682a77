//! Enrollment handlers: lookups, the enroll workflow, grade and status updates.

use super::{parse_id, ListParams};
use crate::error::AppError;
use crate::models::{
    grade_letter, EnrollRequest, EnrollmentStatus, GradeUpdate, StatusUpdate,
};
use crate::repo;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::validation;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = repo::enrollments::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let enrollment = repo::enrollments::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("enrollment {}", id)))?;
    Ok(success_one_ok(enrollment))
}

pub async fn by_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student_id = parse_id(&id_str)?;
    let rows = repo::enrollments::find_by_student(&state.pool, student_id).await?;
    Ok(success_many(rows))
}

pub async fn by_course(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let course_id = parse_id(&id_str)?;
    let rows = repo::enrollments::find_by_course(&state.pool, course_id).await?;
    Ok(success_many(rows))
}

pub async fn by_status(
    State(state): State<AppState>,
    Path(status_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let status: EnrollmentStatus = status_str.parse()?;
    let rows = repo::enrollments::find_by_status(&state.pool, status).await?;
    Ok(success_many(rows))
}

pub async fn with_grades(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = repo::enrollments::find_with_grades(&state.pool).await?;
    Ok(success_many(rows))
}

/// Enroll a student in a course. Preconditions, first failure wins: student
/// exists, course exists, no duplicate (student, course) pair, capacity not
/// reached. The whole check-and-insert runs in one transaction with the course
/// row locked, so a concurrent enroll against the same course waits for this
/// one to commit.
pub async fn enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut tx = state.pool.begin().await?;
    if !repo::students::exists_by_id_tx(&mut tx, req.student_id).await? {
        return Err(AppError::NotFound(format!("student {}", req.student_id)));
    }
    let course = repo::courses::find_for_update_tx(&mut tx, req.course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", req.course_id)))?;
    if repo::enrollments::exists_pair_tx(&mut tx, req.student_id, req.course_id).await? {
        return Err(AppError::Conflict(
            "student is already enrolled in this course".into(),
        ));
    }
    if let Some(max_capacity) = course.max_capacity {
        let enrolled = repo::enrollments::count_enrolled_tx(&mut tx, req.course_id).await?;
        ensure_capacity(course.id, max_capacity, enrolled)?;
    }
    let status = req.status.unwrap_or(EnrollmentStatus::Enrolled);
    let enrollment =
        repo::enrollments::insert_tx(&mut tx, req.student_id, req.course_id, status).await?;
    tx.commit().await?;
    tracing::info!(
        id = enrollment.id,
        student_id = req.student_id,
        course_id = req.course_id,
        "student enrolled"
    );
    Ok(success_one(enrollment))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let enrollment = repo::enrollments::update_status(&state.pool, id, body.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("enrollment {}", id)))?;
    Ok(success_one_ok(enrollment))
}

/// Validate the grade, then store it together with its derived letter. A null
/// grade clears both.
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<GradeUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    validation::validate_grade(body.grade)?;
    let letter = grade_letter(body.grade);
    let enrollment = repo::enrollments::update_grade(&state.pool, id, body.grade, letter)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("enrollment {}", id)))?;
    Ok(success_one_ok(enrollment))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !repo::enrollments::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("enrollment {}", id)));
    }
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Capacity rule: an enroll is rejected once the ENROLLED count has reached
/// the course limit. Callers skip the check entirely for unlimited courses.
fn ensure_capacity(course_id: i64, max_capacity: i32, enrolled: i64) -> Result<(), AppError> {
    if enrolled >= i64::from(max_capacity) {
        return Err(AppError::CapacityExceeded {
            course_id,
            max_capacity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_capacity_is_allowed() {
        assert!(ensure_capacity(1, 30, 29).is_ok());
        assert!(ensure_capacity(1, 30, 0).is_ok());
    }

    #[test]
    fn at_capacity_is_rejected() {
        let err = ensure_capacity(1, 30, 30).unwrap_err();
        assert!(matches!(
            err,
            AppError::CapacityExceeded {
                course_id: 1,
                max_capacity: 30
            }
        ));
    }

    #[test]
    fn over_capacity_is_rejected() {
        assert!(ensure_capacity(1, 30, 31).is_err());
    }

    #[test]
    fn zero_capacity_rejects_first_enroll() {
        assert!(ensure_capacity(1, 0, 0).is_err());
    }
}
