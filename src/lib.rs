//! University records REST backend: students, courses, and enrollments over
//! PostgreSQL, with uniqueness and capacity rules enforced at write time.

pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod repo;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use error::AppError;
pub use migration::{apply_migrations, ensure_database_exists};
pub use response::{success_many, success_one, success_one_ok};
pub use routes::{common_routes, common_routes_with_ready, course_routes, enrollment_routes, student_routes};
pub use state::AppState;
