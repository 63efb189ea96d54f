//! Error types surfaced to store callers.
//!
//! Remote-call and persistence failures are caught and logged inside the
//! store; only logical failures reach the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The operation targeted an employee id not present in the roster.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),
}
