use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single penalty entry. Append-only; an employee may accumulate many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRecord {
    pub id: i64,
    #[serde(rename = "employeeId")]
    pub employee_id: i64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub date: DateTime<Utc>,
}

/// A single bonus entry. Same shape and lifecycle as `PenaltyRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRecord {
    pub id: i64,
    #[serde(rename = "employeeId")]
    pub employee_id: i64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub date: DateTime<Utc>,
}

/// Caller-provided fields for a penalty or bonus. A missing amount counts
/// as zero toward the employee's accumulated total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustmentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
