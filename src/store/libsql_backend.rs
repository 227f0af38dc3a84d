//! libSQL backend — durable `KeyValueStore` implementation.
//!
//! Rows live in `guidance_kv`, keyed by `(profile_id, key)`. Each store
//! instance is bound to one profile, so two profiles sharing a database file
//! never see each other's guidance state.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use super::migrations;
use super::traits::KeyValueStore;
use crate::error::StoreError;

/// libSQL key/value store bound to a single profile.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
    profile_id: String,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path, profile_id: &str) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("Failed to create database directory: {e}"))
                })?;
            }
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db, profile_id).await?;
        info!(path = %path.display(), profile = %profile_id, "Guidance store opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory(profile_id: &str) -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StoreError::Unavailable(format!("Failed to create in-memory database: {e}"))
            })?;
        Self::from_database(db, profile_id).await
    }

    async fn from_database(db: LibSqlDatabase, profile_id: &str) -> Result<Self, StoreError> {
        let conn = db
            .connect()
            .map_err(|e| StoreError::Unavailable(format!("Failed to create connection: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
            profile_id: profile_id.to_string(),
        })
    }

    /// Profile this store reads and writes.
    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl KeyValueStore for LibSqlStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT value FROM guidance_kv WHERE profile_id = ?1 AND key = ?2",
                params![self.profile_id.as_str(), key],
            )
            .await
            .map_err(|e| StoreError::Query(format!("get: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value: String = row
                    .get(0)
                    .map_err(|e| StoreError::Query(format!("get: {e}")))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Query(format!("get: {e}"))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT INTO guidance_kv (profile_id, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (profile_id, key) DO UPDATE SET value = ?3, updated_at = ?4",
                params![self.profile_id.as_str(), key, value, now],
            )
            .await
            .map_err(|e| StoreError::Query(format!("set: {e}")))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn()
            .execute(
                "DELETE FROM guidance_kv WHERE profile_id = ?1 AND key = ?2",
                params![self.profile_id.as_str(), key],
            )
            .await
            .map_err(|e| StoreError::Query(format!("remove: {e}")))?;
        Ok(())
    }
}
