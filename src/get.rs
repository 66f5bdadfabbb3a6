//! Stored advisory retrieval.
//!
//! Backs `launchwatch list`, `launchwatch get` and `GET /advisories`.

use anyhow::{bail, Result};
use launchwatch_core::models::EnrichedAdvisory;
use launchwatch_core::store::Store;
use serde::Serialize;

use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Response shape of `GET /advisories` and `launchwatch list --json`.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryList {
    pub advisories: Vec<EnrichedAdvisory>,
}

/// Read every stored advisory, ordered by `advisoryid`.
pub async fn list_advisories(config: &Config) -> Result<AdvisoryList> {
    let store = SqliteStore::open(config.db.connection_url()?, &config.db.collection).await?;
    let result = store.find_all().await;
    store.close().await;
    Ok(AdvisoryList {
        advisories: result?,
    })
}

pub async fn get_advisory(config: &Config, advisoryid: i64) -> Result<EnrichedAdvisory> {
    let store = SqliteStore::open(config.db.connection_url()?, &config.db.collection).await?;
    let result = store.find_by_id(advisoryid).await;
    store.close().await;
    match result? {
        Some(record) => Ok(record),
        None => bail!("advisory not found: {}", advisoryid),
    }
}

pub async fn run_list(config: &Config, json: bool) -> Result<()> {
    let list = list_advisories(config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.advisories.is_empty() {
        println!("No advisories stored.");
        return Ok(());
    }

    println!(
        "{:<12} {:<22} {:>7}  SUMMARY",
        "ADVISORYID", "START", "WINDOWS"
    );
    for record in &list.advisories {
        println!(
            "{:<12} {:<22} {:>7}  {}",
            record.advisoryid(),
            record.advisory.advisorystarttime,
            record.parsed_details.len(),
            record.advisory.summary
        );
    }
    Ok(())
}

pub async fn run_get(config: &Config, advisoryid: i64) -> Result<()> {
    let record = get_advisory(config, advisoryid).await?;
    let advisory = &record.advisory;

    println!("--- Advisory ---");
    println!("advisoryid:        {}", advisory.advisoryid);
    println!("advisorystarttime: {}", advisory.advisorystarttime);
    println!("summary:           {}", advisory.summary);
    if !advisory.extra.is_empty() {
        println!(
            "extra:             {}",
            serde_json::Value::Object(advisory.extra.clone())
        );
    }
    println!();

    println!("--- Details ---");
    println!("{}", advisory.details);
    println!();

    println!("--- Windows ({}) ---", record.parsed_details.len());
    for window in &record.parsed_details {
        println!(
            "{}: {} -> {}",
            window.label, window.start_datetime, window.end_datetime
        );
    }

    Ok(())
}
