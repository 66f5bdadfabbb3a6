//! Upstream feed contract and the source abstraction.
//!
//! The upstream provider answers with a JSON object whose `rows` array holds
//! one object per advisory. That envelope is version 1 of the contract
//! ([`FEED_SCHEMA_VERSION`]). The envelope is validated as a whole; the rows
//! are kept raw and validated one by one with
//! [`Advisory::from_row`](crate::models::Advisory::from_row) so that a single
//! malformed row only costs that row.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Version of the upstream envelope this crate understands.
pub const FEED_SCHEMA_VERSION: u32 = 1;

/// One upstream batch: the raw, not yet validated rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisoryFeed {
    pub rows: Vec<Value>,
}

/// Validate the `{ "rows": [...] }` envelope of an upstream response body.
pub fn decode_feed(body: &str) -> Result<AdvisoryFeed, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(format!("body is not JSON: {}", e)))?;
    feed_from_value(value)
}

/// Same as [`decode_feed`] for an already-parsed document.
pub fn feed_from_value(value: Value) -> Result<AdvisoryFeed, FetchError> {
    let mut object = match value {
        Value::Object(map) => map,
        other => {
            return Err(FetchError::Malformed(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            )))
        }
    };
    match object.remove("rows") {
        Some(Value::Array(rows)) => Ok(AdvisoryFeed { rows }),
        Some(other) => Err(FetchError::Malformed(format!(
            "`rows` must be an array, found {}",
            json_kind(&other)
        ))),
        None => Err(FetchError::Malformed("missing `rows`".to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A provider of advisory batches.
///
/// The production implementation performs an HTTP request; tests supply
/// fixed batches. Any failure is terminal for the invocation that called
/// [`fetch`](AdvisorySource::fetch).
#[async_trait]
pub trait AdvisorySource: Send + Sync {
    /// Short label used in logs (e.g. the upstream host).
    fn name(&self) -> &str;

    /// Retrieve the current upstream batch.
    async fn fetch(&self) -> Result<AdvisoryFeed, FetchError>;
}

/// A source that always returns the same batch.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    feed: AdvisoryFeed,
}

impl StaticSource {
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            feed: AdvisoryFeed { rows },
        }
    }
}

#[async_trait]
impl AdvisorySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<AdvisoryFeed, FetchError> {
        Ok(self.feed.clone())
    }
}
