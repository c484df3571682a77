//! Request handlers, one module per resource.

pub mod courses;
pub mod enrollments;
pub mod students;

use crate::error::AppError;
use serde::Deserialize;

/// List pagination: limit defaults to 100 (capped at 1000), offset to 0.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListParams {
    const DEFAULT_LIMIT: u32 = 100;
    const MAX_LIMIT: u32 = 1000;

    pub fn limit(&self) -> i64 {
        i64::from(self.limit.unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.offset.unwrap_or(0))
    }
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_defaults_and_cap() {
        let p = ListParams {
            limit: None,
            offset: None,
        };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);
        let p = ListParams {
            limit: Some(5000),
            offset: Some(20),
        };
        assert_eq!(p.limit(), 1000);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn id_parsing() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("forty-two").is_err());
    }
}
