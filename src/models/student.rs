//! Student entity: personal details plus an institution-issued 8-digit student ID.

use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a student, independent of any course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "academic_status", rename_all = "UPPERCASE")]
pub enum AcademicStatus {
    Active,
    Inactive,
    Graduated,
    Suspended,
}

impl FromStr for AcademicStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(AcademicStatus::Active),
            "INACTIVE" => Ok(AcademicStatus::Inactive),
            "GRADUATED" => Ok(AcademicStatus::Graduated),
            "SUSPENDED" => Ok(AcademicStatus::Suspended),
            _ => Err(AppError::BadRequest(format!(
                "invalid academic status: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Globally unique.
    pub email: String,
    /// Institution-issued 8-digit identifier, globally unique. Distinct from `id`.
    pub student_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    /// Set to the creation date unless supplied.
    pub enrollment_date: NaiveDate,
    pub academic_status: AcademicStatus,
}

/// Body for create and full update. `enrollment_date` is assigned at creation
/// and never changed through this payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub academic_status: Option<AcademicStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn academic_status_parses_case_insensitively() {
        assert_eq!(
            "GRADUATED".parse::<AcademicStatus>().unwrap(),
            AcademicStatus::Graduated
        );
        assert_eq!(
            "active".parse::<AcademicStatus>().unwrap(),
            AcademicStatus::Active
        );
        assert!("ALUMNI".parse::<AcademicStatus>().is_err());
    }

    #[test]
    fn student_serializes_camel_case() {
        let s = Student {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.edu".into(),
            student_id: "12345678".into(),
            date_of_birth: None,
            phone_number: None,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            academic_status: AcademicStatus::Active,
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["firstName"], "Ada");
        assert_eq!(v["studentId"], "12345678");
        assert_eq!(v["academicStatus"], "ACTIVE");
    }
}
