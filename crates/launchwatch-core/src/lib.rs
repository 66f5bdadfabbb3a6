//! # launchwatch core
//!
//! Pure logic for launchwatch: the advisory data model, day/time window
//! extraction, operator relevance filtering, the store and source traits,
//! and the ingestion pipeline that ties them together.
//!
//! This crate contains no tokio runtime, sqlx or HTTP client; the
//! `launchwatch` crate supplies those.
//!
//! ```text
//! AdvisorySource ─▶ feed rows ─▶ Advisory::from_row ─▶ RelevanceFilter
//!                                                          │
//!        Store ◀─ EnrichedAdvisory ◀─ extract_windows ◀────┘
//! ```

pub mod error;
pub mod extract;
pub mod feed;
pub mod filter;
pub mod models;
pub mod month;
pub mod pipeline;
pub mod store;

pub use error::{FetchError, ParseError, RecordError};
