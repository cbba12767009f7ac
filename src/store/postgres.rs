use sqlx::{postgres::PgPoolOptions, PgPool};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::config::StoreConfig;
use crate::store::{DocumentStore, StoreAction, StoreError, StoreParams};

/// Postgres-backed document store. Each logical collection is a table of
/// JSONB documents keyed by the item's `noteId`. Constructed once at
/// startup from explicit configuration; there is no module-level client.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build the connection pool from DATABASE_URL and pool settings.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&url)
            .await?;

        info!("Created store pool (max_connections={})", config.max_connections);
        Ok(Self { pool })
    }

    /// Ensure the backing table for a collection exists. Run once at startup.
    pub async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        if !Self::is_valid_collection(collection) {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }
        let query = format!(
            "CREATE TABLE IF NOT EXISTS {} (note_id text PRIMARY KEY, doc jsonb NOT NULL)",
            Self::quote_identifier(collection)
        );
        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert the item as a single row. The row is visible to readers only
    /// after the INSERT commits, so no partial record is ever observable.
    async fn put(&self, params: StoreParams) -> Result<Value, StoreError> {
        if !Self::is_valid_collection(&params.collection) {
            return Err(StoreError::InvalidCollection(params.collection));
        }

        let note_id = params
            .payload
            .get("noteId")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::MalformedItem("missing noteId".to_string()))?
            .to_string();

        let query = format!(
            "INSERT INTO {} (note_id, doc) VALUES ($1, $2)",
            Self::quote_identifier(&params.collection)
        );
        sqlx::query(&query)
            .bind(&note_id)
            .bind(&params.payload)
            .execute(&self.pool)
            .await?;

        Ok(params.payload)
    }

    /// Quote SQL identifier to prevent injection.
    fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Collection names are lowercase identifiers: [a-z][a-z0-9_]*.
    fn is_valid_collection(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }
}

#[async_trait::async_trait]
impl DocumentStore for PgStore {
    async fn call(&self, action: StoreAction, params: StoreParams) -> Result<Value, StoreError> {
        match action {
            StoreAction::Put => self.put(params).await,
            // Read paths are not carried by this service
            StoreAction::Get | StoreAction::Query => Err(StoreError::UnsupportedAction(action)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_collection_names() {
        assert!(PgStore::is_valid_collection("notes"));
        assert!(PgStore::is_valid_collection("notes_archive2"));
        assert!(!PgStore::is_valid_collection("Notes"));
        assert!(!PgStore::is_valid_collection("2notes"));
        assert!(!PgStore::is_valid_collection(""));
        assert!(!PgStore::is_valid_collection("notes; DROP TABLE notes"));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(PgStore::quote_identifier("notes"), "\"notes\"");
        assert_eq!(PgStore::quote_identifier("no\"tes"), "\"no\"\"tes\"");
    }
}
