//! # Launchwatch
//!
//! Ingests airspace advisories from an upstream feed, keeps the ones that
//! concern launch operations, extracts their day/time windows and stores
//! the enriched records for later retrieval.
//!
//! The extraction and pipeline logic lives in [`launchwatch_core`]. This
//! crate supplies the native pieces around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────┐   ┌──────────┐
//! │  Upstream   │──▶│  Pipeline        │──▶│  SQLite   │
//! │  (reqwest)  │   │ filter + extract │   │ documents │
//! └─────────────┘   └──────────────────┘   └────┬─────┘
//!                                               │
//!                           ┌───────────────────┤
//!                           ▼                   ▼
//!                      ┌──────────┐       ┌──────────┐
//!                      │   CLI    │       │   HTTP   │
//!                      └──────────┘       └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | Connection pool setup |
//! | [`migrate`] | Collection table creation |
//! | [`sqlite_store`] | SQLite [`Store`](launchwatch_core::store::Store) |
//! | [`upstream`] | HTTP [`AdvisorySource`](launchwatch_core::feed::AdvisorySource) |
//! | [`ingest`] | Per-invocation runner |
//! | [`get`] | Stored advisory retrieval |
//! | [`server`] | HTTP server |

pub mod config;
pub mod db;
pub mod get;
pub mod ingest;
pub mod migrate;
pub mod server;
pub mod sqlite_store;
pub mod upstream;
