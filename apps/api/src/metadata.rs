//! Metadata store client — persists extracted CV text against its file URL.
//!
//! The `pdf_texts` table is append-only: a later extraction of the same file
//! inserts a new independent row, never an UPDATE.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("metadata insert failed: {0}")]
pub struct StoreError(#[from] sqlx::Error);

/// Creates the PostgreSQL connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Records one extracted document.
pub async fn insert_extracted_document(
    pool: &PgPool,
    file_url: &str,
    text: &str,
) -> Result<(), StoreError> {
    sqlx::query("INSERT INTO pdf_texts (file_url, text) VALUES ($1, $2)")
        .bind(file_url)
        .bind(text)
        .execute(pool)
        .await?;

    info!("Stored extracted text for {file_url}");
    Ok(())
}
