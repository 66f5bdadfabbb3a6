//! Per-invocation ingest runner.
//!
//! Wires the native pieces (HTTP source, SQLite store) into
//! [`run_pipeline`](launchwatch_core::pipeline::run_pipeline). Each call opens
//! its own connection pool and closes it before returning, whether the
//! pipeline succeeded or not.

use launchwatch_core::filter::RelevanceFilter;
use launchwatch_core::pipeline::{preview, run_pipeline, IngestReport};
use launchwatch_core::FetchError;
use thiserror::Error;
use tracing::error;

use crate::config::{Config, ConfigError};
use crate::sqlite_store::SqliteStore;
use crate::upstream::HttpAdvisorySource;

/// Failure that stops an invocation before or during the fetch.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("store unavailable: {0}")]
    Store(String),
}

pub fn relevance_filter(config: &Config) -> RelevanceFilter {
    RelevanceFilter::new(&config.filter.keywords)
}

/// Run one ingestion invocation against the configured upstream and store.
///
/// Every failure is logged with `error!` before it is returned, so callers
/// that only need the side effect (the refresh timer) may drop the result.
pub async fn run_ingest(config: &Config) -> Result<IngestReport, InvocationError> {
    let result = ingest_once(config).await;
    if let Err(e) = &result {
        let kind = match e {
            InvocationError::Config(_) => "config",
            InvocationError::Fetch(_) => "fetch",
            InvocationError::Store(_) => "store",
        };
        error!(kind, error = %e, "ingestion failed");
    }
    result
}

async fn ingest_once(config: &Config) -> Result<IngestReport, InvocationError> {
    let url = config.db.connection_url()?;
    let source = HttpAdvisorySource::from_config(&config.upstream)?;
    let filter = relevance_filter(config);

    let store = SqliteStore::open(url, &config.db.collection)
        .await
        .map_err(|e| InvocationError::Store(format!("{:#}", e)))?;

    let result = run_pipeline(&source, &store, &filter).await;
    store.close().await;
    Ok(result?)
}

/// Open the store once so the collection table exists.
pub async fn run_init(config: &Config) -> anyhow::Result<()> {
    let url = config.db.connection_url()?;
    let store = SqliteStore::open(url, &config.db.collection).await?;
    store.close().await;
    println!("Database initialized successfully.");
    Ok(())
}

/// Handler behind `launchwatch sync`.
pub async fn run_sync(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        let source = HttpAdvisorySource::from_config(&config.upstream)?;
        let (report, records) = preview(&source, &relevance_filter(config)).await?;

        println!("sync (dry-run)");
        print_counts(&report);
        for record in &records {
            println!(
                "  {}  {} window(s)  {}",
                record.advisoryid(),
                record.parsed_details.len(),
                record.advisory.summary
            );
        }
        return Ok(());
    }

    let report = run_ingest(config).await?;
    println!("sync");
    print_counts(&report);
    println!("  inserted: {}", report.inserted);
    println!("  replaced: {}", report.replaced);
    println!("ok");
    Ok(())
}

fn print_counts(report: &IngestReport) {
    println!("  fetched: {} rows", report.fetched);
    println!("  invalid: {}", report.invalid);
    println!("  relevant: {}", report.relevant);
    println!("  failed: {}", report.failed);
    println!("  windows: {}", report.windows);
}
