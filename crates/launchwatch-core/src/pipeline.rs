//! Ingestion pipeline orchestration.
//!
//! One invocation: fetch → validate rows → relevance filter → per record
//! (reference year → window extraction → identity-keyed upsert).
//!
//! Records are processed sequentially. A failure inside one record is a
//! [`RecordError`]: it is logged, counted and the batch moves on. Only the
//! fetch can fail the invocation.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{FetchError, RecordError};
use crate::extract::extract_windows;
use crate::feed::AdvisorySource;
use crate::filter::RelevanceFilter;
use crate::models::{Advisory, EnrichedAdvisory};
use crate::store::{Store, UpsertOutcome};

/// Counts for one pipeline invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Rows in the upstream batch.
    pub fetched: usize,
    /// Rows rejected by contract validation.
    pub invalid: usize,
    /// Valid advisories that passed the relevance filter.
    pub relevant: usize,
    pub inserted: usize,
    pub replaced: usize,
    /// Relevant advisories that could not be enriched or stored.
    pub failed: usize,
    /// Windows extracted across all stored advisories.
    pub windows: usize,
}

impl IngestReport {
    pub fn stored(&self) -> usize {
        self.inserted + self.replaced
    }
}

/// Derive the reference year and extract windows for one advisory.
pub fn enrich(advisory: Advisory) -> Result<EnrichedAdvisory, RecordError> {
    let year = advisory.reference_year()?;
    let parsed_details = extract_windows(&advisory.details, year);
    debug!(
        advisoryid = advisory.advisoryid,
        year,
        windows = parsed_details.len(),
        "enriched advisory"
    );
    Ok(EnrichedAdvisory {
        advisory,
        parsed_details,
    })
}

/// Fetch, validate and filter one batch. Shared by [`run_pipeline`] and [`preview`].
async fn relevant_advisories(
    source: &dyn AdvisorySource,
    filter: &RelevanceFilter,
    report: &mut IngestReport,
) -> Result<Vec<Advisory>, FetchError> {
    let feed = source.fetch().await?;
    report.fetched = feed.rows.len();

    let advisories: Vec<Advisory> = feed
        .rows
        .into_iter()
        .filter_map(|row| match Advisory::from_row(row) {
            Ok(advisory) => Some(advisory),
            Err(err) => {
                warn!(advisoryid = ?err.advisoryid(), error = %err, "skipping invalid row");
                report.invalid += 1;
                None
            }
        })
        .collect();

    let relevant = filter.apply(advisories);
    report.relevant = relevant.len();
    Ok(relevant)
}

async fn store_one(store: &dyn Store, advisory: Advisory) -> Result<(UpsertOutcome, usize), RecordError> {
    let advisoryid = advisory.advisoryid;
    let record = enrich(advisory)?;
    let outcome = store
        .upsert_advisory(&record)
        .await
        .map_err(|e| RecordError::Store {
            advisoryid,
            message: format!("{:#}", e),
        })?;
    Ok((outcome, record.parsed_details.len()))
}

/// Run one full ingestion invocation against `source` and `store`.
///
/// Returns `Err` only when the fetch fails, in which case nothing was
/// written. Per-record failures are reflected in [`IngestReport::failed`].
pub async fn run_pipeline(
    source: &dyn AdvisorySource,
    store: &dyn Store,
    filter: &RelevanceFilter,
) -> Result<IngestReport, FetchError> {
    let mut report = IngestReport::default();
    let advisories = relevant_advisories(source, filter, &mut report).await?;

    for advisory in advisories {
        match store_one(store, advisory).await {
            Ok((outcome, windows)) => {
                match outcome {
                    UpsertOutcome::Inserted => report.inserted += 1,
                    UpsertOutcome::Replaced => report.replaced += 1,
                }
                report.windows += windows;
            }
            Err(err) => {
                warn!(advisoryid = ?err.advisoryid(), error = %err, "skipping advisory");
                report.failed += 1;
            }
        }
    }

    info!(
        source = source.name(),
        fetched = report.fetched,
        relevant = report.relevant,
        inserted = report.inserted,
        replaced = report.replaced,
        failed = report.failed,
        windows = report.windows,
        "advisories processed"
    );
    Ok(report)
}

/// Fetch, filter and enrich without storing anything.
///
/// Advisories that fail enrichment are counted in `failed` and left out.
pub async fn preview(
    source: &dyn AdvisorySource,
    filter: &RelevanceFilter,
) -> Result<(IngestReport, Vec<EnrichedAdvisory>), FetchError> {
    let mut report = IngestReport::default();
    let advisories = relevant_advisories(source, filter, &mut report).await?;

    let mut enriched = Vec::with_capacity(advisories.len());
    for advisory in advisories {
        match enrich(advisory) {
            Ok(record) => {
                report.windows += record.parsed_details.len();
                enriched.push(record);
            }
            Err(err) => {
                warn!(advisoryid = ?err.advisoryid(), error = %err, "skipping advisory");
                report.failed += 1;
            }
        }
    }
    Ok((report, enriched))
}
