//! Course entity: catalog data plus an optional enrollment capacity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    /// Globally unique course code, e.g. "CS101".
    pub code: String,
    pub description: Option<String>,
    pub credit_hours: Option<i32>,
    /// Maximum count of ENROLLED enrollments. None = unlimited.
    pub max_capacity: Option<i32>,
}

/// Body for create and full update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub credit_hours: Option<i32>,
    pub max_capacity: Option<i32>,
}
