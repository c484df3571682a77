//! Field-level validation, checked before any write. Fail-fast: the first
//! violated rule fails the request and nothing is persisted.

use crate::error::AppError;
use crate::models::{CoursePayload, StudentPayload};
use regex::Regex;
use std::sync::LazyLock;

static STUDENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("valid pattern"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid pattern"));

pub fn validate_student(payload: &StudentPayload) -> Result<(), AppError> {
    required_length("firstName", &payload.first_name, 2, 50)?;
    required_length("lastName", &payload.last_name, 2, 50)?;
    if !EMAIL_RE.is_match(&payload.email) {
        return Err(AppError::Validation("email must be a valid email".into()));
    }
    if !STUDENT_ID_RE.is_match(&payload.student_id) {
        return Err(AppError::Validation("studentId must be 8 digits".into()));
    }
    Ok(())
}

pub fn validate_course(payload: &CoursePayload) -> Result<(), AppError> {
    required_length("title", &payload.title, 3, 100)?;
    required_length("code", &payload.code, 2, 10)?;
    if let Some(desc) = &payload.description {
        if desc.chars().count() > 500 {
            return Err(AppError::Validation(
                "description must be at most 500 characters".into(),
            ));
        }
    }
    Ok(())
}

/// A grade may be absent; when present it must lie in [0, 100].
pub fn validate_grade(grade: Option<f64>) -> Result<(), AppError> {
    if let Some(g) = grade {
        if !(0.0..=100.0).contains(&g) {
            return Err(AppError::Validation(
                "grade must be between 0 and 100".into(),
            ));
        }
    }
    Ok(())
}

fn required_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(first: &str, last: &str, email: &str, student_id: &str) -> StudentPayload {
        StudentPayload {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            student_id: student_id.into(),
            date_of_birth: None,
            phone_number: None,
            academic_status: None,
        }
    }

    fn course(title: &str, code: &str) -> CoursePayload {
        CoursePayload {
            title: title.into(),
            code: code.into(),
            description: None,
            credit_hours: None,
            max_capacity: None,
        }
    }

    #[test]
    fn valid_student_passes() {
        assert!(validate_student(&student("Ada", "Lovelace", "ada@example.edu", "12345678")).is_ok());
    }

    #[test]
    fn seven_digit_student_id_fails_eight_passes() {
        let p = student("Ada", "Lovelace", "ada@example.edu", "1234567");
        assert!(validate_student(&p).is_err());
        let p = student("Ada", "Lovelace", "ada@example.edu", "12345678");
        assert!(validate_student(&p).is_ok());
    }

    #[test]
    fn non_digit_student_id_fails() {
        let p = student("Ada", "Lovelace", "ada@example.edu", "1234567a");
        assert!(validate_student(&p).is_err());
    }

    #[test]
    fn blank_or_short_names_fail() {
        assert!(validate_student(&student("", "Lovelace", "a@b.co", "12345678")).is_err());
        assert!(validate_student(&student("A", "Lovelace", "a@b.co", "12345678")).is_err());
        assert!(validate_student(&student("Ada", &"x".repeat(51), "a@b.co", "12345678")).is_err());
    }

    #[test]
    fn malformed_email_fails() {
        assert!(validate_student(&student("Ada", "Lovelace", "not-an-email", "12345678")).is_err());
        assert!(validate_student(&student("Ada", "Lovelace", "a@b", "12345678")).is_err());
    }

    #[test]
    fn course_title_and_code_lengths() {
        assert!(validate_course(&course("Data Structures", "CS201")).is_ok());
        assert!(validate_course(&course("DS", "CS201")).is_err()); // title < 3
        assert!(validate_course(&course("Data Structures", "C")).is_err()); // code < 2
        assert!(validate_course(&course("Data Structures", &"C".repeat(11))).is_err());
    }

    #[test]
    fn long_description_fails() {
        let mut c = course("Data Structures", "CS201");
        c.description = Some("x".repeat(501));
        assert!(validate_course(&c).is_err());
        c.description = Some("x".repeat(500));
        assert!(validate_course(&c).is_ok());
    }

    #[test]
    fn grade_range() {
        assert!(validate_grade(Some(0.0)).is_ok());
        assert!(validate_grade(Some(100.0)).is_ok());
        assert!(validate_grade(Some(150.0)).is_err());
        assert!(validate_grade(Some(-1.0)).is_err());
        assert!(validate_grade(None).is_ok());
    }
}
