use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{ExtractionResult, Program, ServiceType};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum ProgramStoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored extraction for program {0}: {1}")]
    InvalidExtraction(String, serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL-backed program store.
///
/// Programs and their extraction output are written by the ingestion
/// fetchers; the matching engine only reads an active snapshot per request.
pub struct ProgramStore {
    pool: PgPool,
}

impl ProgramStore {
    /// Create a new store from a connection string, running migrations.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, ProgramStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, ProgramStoreError> {
        tracing::info!("Connecting to PostgreSQL");
        Self::new(url, max_connections.unwrap_or(10), min_connections.unwrap_or(1)).await
    }

    /// Fetch the active-program snapshot the matcher scores against.
    ///
    /// Active means `is_active` and not past `end_date`; ordered by id so
    /// the matcher's tie-break order is stable across requests.
    pub async fn fetch_active_programs(&self) -> Result<Vec<Program>, ProgramStoreError> {
        let query = r#"
            SELECT id, title, organization, category, service_type,
                   start_date, end_date, is_active, detail_url, extraction
            FROM programs
            WHERE is_active = TRUE
              AND (end_date IS NULL OR end_date >= CURRENT_DATE)
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let programs: Result<Vec<Program>, ProgramStoreError> =
            rows.iter().map(row_to_program).collect();
        let programs = programs?;

        tracing::debug!("Fetched {} active programs", programs.len());

        Ok(programs)
    }

    /// Fetch one program by id.
    pub async fn fetch_program(&self, id: &str) -> Result<Program, ProgramStoreError> {
        let query = r#"
            SELECT id, title, organization, category, service_type,
                   start_date, end_date, is_active, detail_url, extraction
            FROM programs
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ProgramStoreError::NotFound(id.to_string()))?;

        row_to_program(&row)
    }

    /// Persist extraction output for a program.
    ///
    /// Overwrites wholesale; extraction results are never merged.
    pub async fn save_extraction(
        &self,
        program_id: &str,
        extraction: &ExtractionResult,
    ) -> Result<(), ProgramStoreError> {
        let query = r#"
            UPDATE programs
            SET extraction = $2, extracted_at = NOW()
            WHERE id = $1
        "#;

        let payload = serde_json::to_value(extraction)
            .map_err(|e| ProgramStoreError::InvalidExtraction(program_id.to_string(), e))?;

        let result = sqlx::query(query)
            .bind(program_id)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ProgramStoreError::NotFound(program_id.to_string()));
        }

        tracing::debug!("Saved extraction for program {}", program_id);

        Ok(())
    }

    /// Check database connectivity
    pub async fn health_check(&self) -> Result<(), ProgramStoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_program(row: &sqlx::postgres::PgRow) -> Result<Program, ProgramStoreError> {
    let id: String = row.get("id");
    let extraction: serde_json::Value = row.get("extraction");
    let extraction: ExtractionResult = serde_json::from_value(extraction)
        .map_err(|e| ProgramStoreError::InvalidExtraction(id.clone(), e))?;
    let service_type: String = row.get("service_type");

    Ok(Program {
        id,
        title: row.get("title"),
        organization: row.get("organization"),
        category: row.get("category"),
        service_type: parse_service_type(&service_type),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        is_active: row.get("is_active"),
        detail_url: row.get("detail_url"),
        extraction,
    })
}

fn parse_service_type(value: &str) -> ServiceType {
    match value {
        "business" => ServiceType::Business,
        "personal" => ServiceType::Personal,
        "both" => ServiceType::Both,
        _ => ServiceType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_type_defaults_to_unknown() {
        assert_eq!(parse_service_type("business"), ServiceType::Business);
        assert_eq!(parse_service_type("garbage"), ServiceType::Unknown);
    }
}
