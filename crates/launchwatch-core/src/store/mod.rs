//! Storage abstraction for enriched advisories.
//!
//! The [`Store`] trait is the document-store surface the ingestion pipeline
//! and the read paths need, enabling pluggable backends (SQLite in the
//! `launchwatch` crate, in-memory here).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::models::EnrichedAdvisory;

/// What an upsert did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No record with this identity existed.
    Inserted,
    /// A record with this identity was overwritten wholesale.
    Replaced,
}

/// Abstract document store keyed by `advisoryid`.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`upsert_advisory`](Store::upsert_advisory) | Insert, or replace the whole record with the same identity |
/// | [`find_all`](Store::find_all) | Every stored record, ordered by `advisoryid` |
/// | [`find_by_id`](Store::find_by_id) | One record by identity |
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert the record, or replace the stored one with the same `advisoryid`.
    ///
    /// Replacement is total: no field of the previous document survives.
    async fn upsert_advisory(&self, record: &EnrichedAdvisory) -> Result<UpsertOutcome>;

    async fn find_all(&self) -> Result<Vec<EnrichedAdvisory>>;

    async fn find_by_id(&self, advisoryid: i64) -> Result<Option<EnrichedAdvisory>>;
}
