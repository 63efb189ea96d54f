use serde::{Deserialize, Serialize};

/// Work hours for one employee. At most one record per employee id; the
/// store upserts rather than appending duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursRecord {
    #[serde(rename = "employeeId")]
    pub employee_id: i64,
    #[serde(rename = "regularHours", default)]
    pub regular_hours: f64,
    #[serde(default)]
    pub overtime: f64,
    #[serde(default)]
    pub undertime: f64,
}

impl HoursRecord {
    /// The record every employee starts with.
    pub fn zeroed(employee_id: i64) -> Self {
        Self {
            employee_id,
            regular_hours: 0.0,
            overtime: 0.0,
            undertime: 0.0,
        }
    }

    /// Build a fresh record from an update: provided fields, zero otherwise.
    pub fn from_update(employee_id: i64, update: &HoursUpdate) -> Self {
        let mut record = Self::zeroed(employee_id);
        record.apply(update);
        record
    }

    /// Per-field merge: a provided value overwrites, a missing one retains
    /// the existing value.
    pub fn apply(&mut self, update: &HoursUpdate) {
        if let Some(regular_hours) = update.regular_hours {
            self.regular_hours = regular_hours;
        }
        if let Some(overtime) = update.overtime {
            self.overtime = overtime;
        }
        if let Some(undertime) = update.undertime {
            self.undertime = undertime;
        }
    }
}

/// Partial hours update, upserted by employee id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoursUpdate {
    #[serde(rename = "regularHours", default, skip_serializing_if = "Option::is_none")]
    pub regular_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undertime: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_provided_fields() {
        let mut record = HoursRecord {
            employee_id: 1,
            regular_hours: 160.0,
            overtime: 8.0,
            undertime: 2.0,
        };

        record.apply(&HoursUpdate {
            overtime: Some(12.0),
            ..Default::default()
        });

        assert_eq!(record.regular_hours, 160.0);
        assert_eq!(record.overtime, 12.0);
        assert_eq!(record.undertime, 2.0);
    }

    #[test]
    fn test_from_update_zero_fills_missing_fields() {
        let record = HoursRecord::from_update(
            9,
            &HoursUpdate {
                regular_hours: Some(140.0),
                ..Default::default()
            },
        );

        assert_eq!(record.employee_id, 9);
        assert_eq!(record.regular_hours, 140.0);
        assert_eq!(record.overtime, 0.0);
        assert_eq!(record.undertime, 0.0);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let json = serde_json::to_string(&HoursRecord::zeroed(3)).unwrap();
        assert!(json.contains("\"employeeId\":3"));
        assert!(json.contains("\"regularHours\""));
    }
}
