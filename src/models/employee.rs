use serde::{Deserialize, Serialize};

/// Employment status of a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Hired,
    Fired,
    Interview,
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeStatus::Hired => write!(f, "hired"),
            EmployeeStatus::Fired => write!(f, "fired"),
            EmployeeStatus::Interview => write!(f, "interview"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub fullname: String,
    pub status: EmployeeStatus,
    pub salary: f64,
    /// Number of penalties on record. Maintained by the store at every
    /// mutation site, never recomputed from the penalty collection.
    #[serde(default)]
    pub penalties: u32,
    /// Number of bonuses on record. Same rule as `penalties`.
    #[serde(default)]
    pub bonuses: u32,
    #[serde(rename = "totalPenalties", default)]
    pub total_penalties: f64,
    #[serde(rename = "totalBonuses", default)]
    pub total_bonuses: f64,
}

impl Employee {
    /// Build a roster entry from caller-provided fields and an assigned id.
    /// Counters default to zero, accumulated totals always start at zero.
    pub fn from_new(id: i64, new: NewEmployee) -> Self {
        Self {
            id,
            fullname: new.fullname,
            status: new.status,
            salary: new.salary,
            penalties: new.penalties.unwrap_or(0),
            bonuses: new.bonuses.unwrap_or(0),
            total_penalties: 0.0,
            total_bonuses: 0.0,
        }
    }

    /// Shallow merge: provided fields overwrite, missing fields are kept.
    pub fn apply(&mut self, update: &EmployeeUpdate) {
        if let Some(ref fullname) = update.fullname {
            self.fullname = fullname.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(salary) = update.salary {
            self.salary = salary;
        }
    }

    /// Fixed roster served when no remote endpoint is configured.
    pub fn demo_roster() -> Vec<Employee> {
        vec![
            Employee {
                id: 1,
                fullname: "John Doe".to_string(),
                status: EmployeeStatus::Hired,
                salary: 50000.0,
                penalties: 2,
                bonuses: 1,
                total_penalties: 0.0,
                total_bonuses: 0.0,
            },
            Employee {
                id: 2,
                fullname: "Jane Smith".to_string(),
                status: EmployeeStatus::Hired,
                salary: 65000.0,
                penalties: 0,
                bonuses: 3,
                total_penalties: 0.0,
                total_bonuses: 0.0,
            },
            Employee {
                id: 3,
                fullname: "Mike Johnson".to_string(),
                status: EmployeeStatus::Fired,
                salary: 45000.0,
                penalties: 5,
                bonuses: 0,
                total_penalties: 0.0,
                total_bonuses: 0.0,
            },
            Employee {
                id: 4,
                fullname: "Sarah Williams".to_string(),
                status: EmployeeStatus::Interview,
                salary: 55000.0,
                penalties: 0,
                bonuses: 0,
                total_penalties: 0.0,
                total_bonuses: 0.0,
            },
        ]
    }
}

/// Fields accepted when creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub fullname: String,
    pub status: EmployeeStatus,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalties: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonuses: Option<u32>,
}

/// Partial update for an existing employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}
