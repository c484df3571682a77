//! Student CRUD and lookup handlers.

use super::{parse_id, ListParams};
use crate::error::AppError;
use crate::models::{AcademicStatus, StudentPayload};
use crate::repo;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::validation;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = repo::students::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let student = repo::students::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok(success_one_ok(student))
}

pub async fn by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student = repo::students::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student with email {}", email)))?;
    Ok(success_one_ok(student))
}

pub async fn by_student_id(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let student = repo::students::find_by_student_id(&state.pool, &student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student with studentId {}", student_id)))?;
    Ok(success_one_ok(student))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = repo::students::search_by_name(&state.pool, &query.name).await?;
    Ok(success_many(rows))
}

pub async fn by_status(
    State(state): State<AppState>,
    Path(status_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let status: AcademicStatus = status_str.parse()?;
    let rows = repo::students::find_by_status(&state.pool, status).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<StudentPayload>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validation::validate_student(&payload)?;
    if repo::students::exists_by_email(&state.pool, &payload.email).await? {
        return Err(AppError::Conflict("email already in use".into()));
    }
    if repo::students::exists_by_student_id(&state.pool, &payload.student_id).await? {
        return Err(AppError::Conflict("studentId already in use".into()));
    }
    let student = repo::students::insert(&state.pool, &payload).await?;
    tracing::info!(id = student.id, "student created");
    Ok(success_one(student))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(payload): Json<StudentPayload>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    validation::validate_student(&payload)?;
    let current = repo::students::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    // Conflict checks only when the unique field actually changes.
    if payload.email != current.email
        && repo::students::exists_by_email(&state.pool, &payload.email).await?
    {
        return Err(AppError::Conflict("email already in use".into()));
    }
    if payload.student_id != current.student_id
        && repo::students::exists_by_student_id(&state.pool, &payload.student_id).await?
    {
        return Err(AppError::Conflict("studentId already in use".into()));
    }
    let student = repo::students::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok(success_one_ok(student))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !repo::students::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("student {}", id)));
    }
    tracing::info!(id, "student deleted");
    Ok(axum::http::StatusCode::NO_CONTENT)
}
