//! Typed query layer over PostgreSQL, one module per table.

pub mod courses;
pub mod enrollments;
pub mod students;
