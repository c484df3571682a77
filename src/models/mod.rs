//! Domain entities and request payloads.

pub mod course;
pub mod enrollment;
pub mod student;

pub use course::{Course, CoursePayload};
pub use enrollment::{
    grade_letter, EnrollRequest, Enrollment, EnrollmentStatus, GradeUpdate, StatusUpdate,
};
pub use student::{AcademicStatus, Student, StudentPayload};
