//! Enrollment routes, including the enroll workflow and grade/status updates.

use crate::handlers::enrollments::{
    by_course, by_status, by_student, delete as delete_handler, enroll, list, read, update_grade,
    update_status, with_grades,
};
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn enrollment_routes(state: AppState) -> Router {
    Router::new()
        .route("/enrollments", get(list).post(enroll))
        .route("/enrollments/with-grades", get(with_grades))
        .route("/enrollments/student/:student_id", get(by_student))
        .route("/enrollments/course/:course_id", get(by_course))
        .route("/enrollments/status/:status", get(by_status))
        .route("/enrollments/:id", get(read).delete(delete_handler))
        .route("/enrollments/:id/status", put(update_status))
        .route("/enrollments/:id/grade", put(update_grade))
        .with_state(state)
}
