//! REST API client module for the HR backend.
//!
//! This module provides the `ApiClient` for talking to the optional HR
//! backend. The cache store only calls it when a real endpoint is
//! configured; any failure is logged and treated as absence of data.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
