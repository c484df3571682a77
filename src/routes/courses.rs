//! Course routes.

use crate::handlers::courses::{
    available, by_code, create, delete as delete_handler, list, read, search, update,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn course_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(list).post(create))
        .route("/courses/search", get(search))
        .route("/courses/available", get(available))
        .route("/courses/code/:code", get(by_code))
        .route("/courses/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
