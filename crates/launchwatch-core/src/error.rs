//! Error taxonomy for the extraction and ingestion core.
//!
//! Each error type is scoped to the unit of work it can spoil:
//!
//! | Type | Scope | Handled at |
//! |------|-------|------------|
//! | [`ParseError`] | one time window | [`extract_windows`](crate::extract::extract_windows), window skipped |
//! | [`RecordError`] | one advisory | [`run_pipeline`](crate::pipeline::run_pipeline), record skipped |
//! | [`FetchError`] | whole invocation | caller of the pipeline |

use thiserror::Error;

/// A single day/time window could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown month abbreviation: '{0}'")]
    UnknownMonth(String),

    #[error("malformed date part '{fragment}': {reason}")]
    MalformedDatePart { fragment: String, reason: String },

    #[error("malformed time part '{fragment}': {reason}")]
    MalformedTimePart { fragment: String, reason: String },
}

impl ParseError {
    pub(crate) fn date(fragment: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedDatePart {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn time(fragment: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedTimePart {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }
}

/// One advisory could not be validated, enriched or stored.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The raw upstream row does not match the advisory contract.
    #[error("invalid advisory row{}: {reason}", id_suffix(.advisoryid))]
    Invalid {
        advisoryid: Option<i64>,
        reason: String,
    },

    /// `advisorystarttime` could not be read as a date, so no reference year exists.
    #[error("advisory {advisoryid}: unreadable advisorystarttime '{value}'")]
    StartTime { advisoryid: i64, value: String },

    /// The store rejected the upsert.
    #[error("advisory {advisoryid}: store upsert failed: {message}")]
    Store { advisoryid: i64, message: String },
}

impl RecordError {
    /// Identity of the record the error belongs to, when it is known.
    pub fn advisoryid(&self) -> Option<i64> {
        match self {
            RecordError::Invalid { advisoryid, .. } => *advisoryid,
            RecordError::StartTime { advisoryid, .. } | RecordError::Store { advisoryid, .. } => {
                Some(*advisoryid)
            }
        }
    }
}

fn id_suffix(id: &Option<i64>) -> String {
    id.map(|id| format!(" (advisoryid {})", id))
        .unwrap_or_default()
}

/// The upstream batch could not be obtained. Terminal for an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Request(String),

    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    #[error("upstream feed is malformed: {0}")]
    Malformed(String),
}
