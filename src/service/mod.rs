pub mod validation;

pub use validation::{validate_course, validate_grade, validate_student};
