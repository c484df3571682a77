//! Enrollment: the join record linking one student to one course, carrying
//! status and an optional graded result.

use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of an enrollment. Any status may move to any other status; ENROLLED
/// is the only initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "enrollment_status", rename_all = "UPPERCASE")]
pub enum EnrollmentStatus {
    Enrolled,
    Completed,
    Dropped,
    Withdrawn,
}

impl FromStr for EnrollmentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENROLLED" => Ok(EnrollmentStatus::Enrolled),
            "COMPLETED" => Ok(EnrollmentStatus::Completed),
            "DROPPED" => Ok(EnrollmentStatus::Dropped),
            "WITHDRAWN" => Ok(EnrollmentStatus::Withdrawn),
            _ => Err(AppError::BadRequest(format!(
                "invalid enrollment status: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_date: NaiveDate,
    pub status: EnrollmentStatus,
    /// Numeric grade in [0, 100] once assigned.
    pub grade: Option<f64>,
    /// Always the deterministic mapping of `grade`; never set independently.
    pub grade_letter: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Refreshed whenever the grade changes.
    pub updated_at: DateTime<Utc>,
}

/// Body for POST /api/enrollments. Status defaults to ENROLLED.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub status: Option<EnrollmentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeUpdate {
    pub grade: Option<f64>,
}

/// Letter grade for a numeric grade: >=90 A, >=80 B, >=70 C, >=60 D, else F.
/// No grade, no letter.
pub fn grade_letter(grade: Option<f64>) -> Option<&'static str> {
    let g = grade?;
    Some(if g >= 90.0 {
        "A"
    } else if g >= 80.0 {
        "B"
    } else if g >= 70.0 {
        "C"
    } else if g >= 60.0 {
        "D"
    } else {
        "F"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_letter_bands() {
        assert_eq!(grade_letter(Some(93.0)), Some("A"));
        assert_eq!(grade_letter(Some(85.0)), Some("B"));
        assert_eq!(grade_letter(Some(72.0)), Some("C"));
        assert_eq!(grade_letter(Some(65.0)), Some("D"));
        assert_eq!(grade_letter(Some(40.0)), Some("F"));
    }

    #[test]
    fn grade_letter_boundaries() {
        assert_eq!(grade_letter(Some(90.0)), Some("A"));
        assert_eq!(grade_letter(Some(80.0)), Some("B"));
        assert_eq!(grade_letter(Some(70.0)), Some("C"));
        assert_eq!(grade_letter(Some(60.0)), Some("D"));
        assert_eq!(grade_letter(Some(59.9)), Some("F"));
        assert_eq!(grade_letter(Some(0.0)), Some("F"));
    }

    #[test]
    fn no_grade_means_no_letter() {
        assert_eq!(grade_letter(None), None);
    }

    #[test]
    fn enroll_request_status_defaults_to_none() {
        let req: EnrollRequest =
            serde_json::from_str(r#"{"studentId": 1, "courseId": 2}"#).unwrap();
        assert_eq!(req.student_id, 1);
        assert_eq!(req.course_id, 2);
        assert!(req.status.is_none());
    }

    #[test]
    fn status_parses_from_path_segment() {
        assert_eq!(
            "withdrawn".parse::<EnrollmentStatus>().unwrap(),
            EnrollmentStatus::Withdrawn
        );
        assert!("PAUSED".parse::<EnrollmentStatus>().is_err());
    }
}
