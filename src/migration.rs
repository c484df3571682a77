//! Schema bootstrap: enum types, tables, and the constraints that back the
//! uniqueness, capacity, and cascade rules.
//!
//! Uniqueness (student email / student ID, course code, one enrollment per
//! (student, course) pair) is enforced at the storage layer so a lost race
//! between two concurrent writes surfaces as a 23505 unique violation, which
//! `error::map_unique_violation` turns into the same `Conflict` outcome as the
//! advisory pre-checks. Cascade deletion of enrollments is the FK rule.

use crate::error::AppError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Enum types. `CREATE TYPE` has no `IF NOT EXISTS`; the error on re-run is ignored.
const ENUM_DDL: &[&str] = &[
    "CREATE TYPE academic_status AS ENUM ('ACTIVE', 'INACTIVE', 'GRADUATED', 'SUSPENDED')",
    "CREATE TYPE enrollment_status AS ENUM ('ENROLLED', 'COMPLETED', 'DROPPED', 'WITHDRAWN')",
];

const TABLE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id BIGSERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        student_id TEXT NOT NULL,
        date_of_birth DATE,
        phone_number TEXT,
        enrollment_date DATE NOT NULL DEFAULT CURRENT_DATE,
        academic_status academic_status NOT NULL DEFAULT 'ACTIVE',
        CONSTRAINT students_email_key UNIQUE (email),
        CONSTRAINT students_student_id_key UNIQUE (student_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        code TEXT NOT NULL,
        description TEXT,
        credit_hours INTEGER,
        max_capacity INTEGER,
        CONSTRAINT courses_code_key UNIQUE (code)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS enrollments (
        id BIGSERIAL PRIMARY KEY,
        student_id BIGINT NOT NULL REFERENCES students (id) ON DELETE CASCADE,
        course_id BIGINT NOT NULL REFERENCES courses (id) ON DELETE CASCADE,
        enrollment_date DATE NOT NULL DEFAULT CURRENT_DATE,
        status enrollment_status NOT NULL DEFAULT 'ENROLLED',
        grade DOUBLE PRECISION CHECK (grade >= 0 AND grade <= 100),
        grade_letter TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT enrollments_student_course_key UNIQUE (student_id, course_id)
    )
    "#,
];

/// Create enum types and tables if missing. Idempotent; run at startup before
/// serving requests.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in ENUM_DDL {
        let _ = sqlx::query(ddl).execute(pool).await;
    }
    for ddl in TABLE_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to
/// the default `postgres` database to run CREATE DATABASE. Call before creating
/// the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_name_extracted_from_url() {
        let (admin, name) =
            parse_db_name_from_url("postgres://localhost:5432/registrar?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost:5432/postgres");
        assert_eq!(name, "registrar");
    }

    #[test]
    fn quoted_identifier_escapes_quotes() {
        assert_eq!(quote_ident("uni\"v"), "\"uni\\\"v\"");
    }
}
