//! SQLite-backed [`Store`] implementation.
//!
//! Each enriched advisory is one JSON document in the collection table,
//! keyed by `advisoryid`. An upsert overwrites the whole document.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use launchwatch_core::models::EnrichedAdvisory;
use launchwatch_core::store::{Store, UpsertOutcome};

use crate::db;
use crate::migrate;

/// SQLite implementation of the [`Store`] trait.
///
/// Owns its connection pool. Call [`close`](SqliteStore::close) when the
/// invocation that opened it is done.
pub struct SqliteStore {
    pool: SqlitePool,
    collection: String,
}

impl SqliteStore {
    /// Connect and make sure the collection table exists.
    pub async fn open(url: &str, collection: &str) -> Result<Self> {
        let pool = db::connect(url)
            .await
            .with_context(|| format!("failed to connect to {}", url))?;
        if let Err(e) = migrate::ensure_collection(&pool, collection).await {
            pool.close().await;
            return Err(e.context(format!("failed to prepare collection '{}'", collection)));
        }
        Ok(Self {
            pool,
            collection: collection.to_string(),
        })
    }

    pub async fn close(self) {
        self.pool.close().await;
    }

    pub async fn count(&self) -> Result<i64> {
        let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.collection))
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

fn decode(advisoryid: i64, document: &str) -> Result<EnrichedAdvisory> {
    serde_json::from_str(document)
        .with_context(|| format!("stored document for advisory {} is corrupt", advisoryid))
}

#[async_trait]
impl Store for SqliteStore {
    async fn upsert_advisory(&self, record: &EnrichedAdvisory) -> Result<UpsertOutcome> {
        let document = serde_json::to_string(record)?;
        let now = chrono::Utc::now().timestamp();

        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar(&format!(
            "SELECT advisoryid FROM {} WHERE advisoryid = ?",
            self.collection
        ))
        .bind(record.advisoryid())
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query(&format!(
            r#"
            INSERT INTO {} (advisoryid, document, ingested_at)
            VALUES (?, ?, ?)
            ON CONFLICT(advisoryid) DO UPDATE SET
                document = excluded.document,
                ingested_at = excluded.ingested_at
            "#,
            self.collection
        ))
        .bind(record.advisoryid())
        .bind(&document)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(match existing {
            Some(_) => UpsertOutcome::Replaced,
            None => UpsertOutcome::Inserted,
        })
    }

    async fn find_all(&self) -> Result<Vec<EnrichedAdvisory>> {
        let rows = sqlx::query(&format!(
            "SELECT advisoryid, document FROM {} ORDER BY advisoryid ASC",
            self.collection
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| decode(row.get("advisoryid"), row.get("document")))
            .collect()
    }

    async fn find_by_id(&self, advisoryid: i64) -> Result<Option<EnrichedAdvisory>> {
        let document: Option<String> = sqlx::query_scalar(&format!(
            "SELECT document FROM {} WHERE advisoryid = ?",
            self.collection
        ))
        .bind(advisoryid)
        .fetch_optional(&self.pool)
        .await?;

        document.map(|d| decode(advisoryid, &d)).transpose()
    }
}
