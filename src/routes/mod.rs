pub mod common;
pub mod courses;
pub mod enrollments;
pub mod students;

pub use common::{common_routes, common_routes_with_ready};
pub use courses::course_routes;
pub use enrollments::enrollment_routes;
pub use students::student_routes;
