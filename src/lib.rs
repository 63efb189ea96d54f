//! hrcache - session-local HR data cache with optional remote sync.
//!
//! The crate centers on [`CacheStore`]: a single source of truth for
//! dashboard metrics, employee records, work-hours entries, penalties and
//! bonuses. Reads serve cached data while it is fresh (5-minute window for
//! dashboard and roster), fall back to the configured REST backend, and
//! fabricate placeholder data when no backend is reachable. Writes commit
//! locally first and persist to a JSON blob; remote sync is advisory and
//! never blocks or rolls back a committed mutation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{CacheStorage, CacheStore, RemoteSync};
pub use config::{StoreConfig, StoreOptions};
pub use error::StoreError;
