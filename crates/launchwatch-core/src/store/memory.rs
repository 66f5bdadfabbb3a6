//! In-memory [`Store`] implementation for testing.
//!
//! Uses a `BTreeMap` behind `std::sync::RwLock`, so `find_all` comes back
//! ordered by `advisoryid` like the SQLite store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::EnrichedAdvisory;

use super::{Store, UpsertOutcome};

/// In-memory store for tests and dry runs.
pub struct InMemoryStore {
    docs: RwLock<BTreeMap<i64, EnrichedAdvisory>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored records. A poisoned lock still reports its contents.
    pub fn len(&self) -> usize {
        match self.docs.read() {
            Ok(docs) => docs.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn upsert_advisory(&self, record: &EnrichedAdvisory) -> Result<UpsertOutcome> {
        let mut docs = self.docs.write().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(match docs.insert(record.advisoryid(), record.clone()) {
            Some(_) => UpsertOutcome::Replaced,
            None => UpsertOutcome::Inserted,
        })
    }

    async fn find_all(&self) -> Result<Vec<EnrichedAdvisory>> {
        let docs = self.docs.read().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(docs.values().cloned().collect())
    }

    async fn find_by_id(&self, advisoryid: i64) -> Result<Option<EnrichedAdvisory>> {
        let docs = self.docs.read().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(docs.get(&advisoryid).cloned())
    }
}
