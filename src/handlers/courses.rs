//! Course CRUD and lookup handlers.

use super::{parse_id, ListParams};
use crate::error::AppError;
use crate::models::CoursePayload;
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
pub struct TitleQuery {
    pub title: String,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = repo::courses::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let course = repo::courses::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id)))?;
    Ok(success_one_ok(course))
}

pub async fn by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let course = repo::courses::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course with code {}", code)))?;
    Ok(success_one_ok(course))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = repo::courses::search_by_title(&state.pool, &query.title).await?;
    Ok(success_many(rows))
}

/// Courses still open for enrollment: unlimited capacity, or ENROLLED count
/// strictly below the limit.
pub async fn available(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = repo::courses::find_available(&state.pool).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CoursePayload>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validation::validate_course(&payload)?;
    if repo::courses::exists_by_code(&state.pool, &payload.code).await? {
        return Err(AppError::Conflict("code already in use".into()));
    }
    let course = repo::courses::insert(&state.pool, &payload).await?;
    tracing::info!(id = course.id, code = %course.code, "course created");
    Ok(success_one(course))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(payload): Json<CoursePayload>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    validation::validate_course(&payload)?;
    let current = repo::courses::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id)))?;
    if payload.code != current.code && repo::courses::exists_by_code(&state.pool, &payload.code).await?
    {
        return Err(AppError::Conflict("code already in use".into()));
    }
    let course = repo::courses::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {}", id)))?;
    Ok(success_one_ok(course))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !repo::courses::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("course {}", id)));
    }
    tracing::info!(id, "course deleted");
    Ok(axum::http::StatusCode::NO_CONTENT)
}
