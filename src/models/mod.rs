//! Data models for HR entities.
//!
//! This module contains all the data structures held by the cache:
//!
//! - `Employee`, `EmployeeStatus`: roster records with derived counters
//! - `HoursRecord`: per-employee work hours, keyed by employee id
//! - `PenaltyRecord`, `BonusRecord`: append-only salary adjustments
//! - `DashboardSummary`: aggregate numbers for the dashboard view
//!
//! Input shapes (`NewEmployee`, `EmployeeUpdate`, `HoursUpdate`,
//! `AdjustmentInput`) carry optional fields with documented defaults.

pub mod adjustment;
pub mod dashboard;
pub mod employee;
pub mod hours;

pub use adjustment::{AdjustmentInput, BonusRecord, PenaltyRecord};
pub use dashboard::DashboardSummary;
pub use employee::{Employee, EmployeeStatus, EmployeeUpdate, NewEmployee};
pub use hours::{HoursRecord, HoursUpdate};
