//! Student routes. Static segments (search, email, status) are registered
//! alongside the `:id` route; the router prefers the static match.

use crate::handlers::students::{
    by_email, by_status, by_student_id, create, delete as delete_handler, list, read, search,
    update,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list).post(create))
        .route("/students/search", get(search))
        .route("/students/email/:email", get(by_email))
        .route("/students/student-id/:student_id", get(by_student_id))
        .route("/students/status/:status", get(by_status))
        .route(
            "/students/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
