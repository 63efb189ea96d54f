use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BonusRecord, DashboardSummary, Employee, HoursRecord, PenaltyRecord};

/// Consider dashboard/employee data stale after 5 minutes.
/// Hours, penalties and bonuses are trusted until mutated.
const CACHE_STALE_MINUTES: i64 = 5;

/// Lowest id handed to a locally created employee.
const FIRST_EMPLOYEE_ID: i64 = 1;

/// The five cached collections plus bookkeeping.
///
/// `None` means a collection has never been populated; an empty vector means
/// it was populated and is currently empty. Reads rely on that distinction
/// when deciding whether to fetch or fabricate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheState {
    pub dashboard: Option<DashboardSummary>,
    pub employees: Option<Vec<Employee>>,
    pub hours: Option<Vec<HoursRecord>>,
    pub penalties: Option<Vec<PenaltyRecord>>,
    pub bonuses: Option<Vec<BonusRecord>>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Next id for a locally created employee. Monotonic for the lifetime
    /// of the persisted state.
    #[serde(default)]
    pub(crate) next_employee_id: i64,
    /// Last id stamped onto a penalty or bonus entry.
    #[serde(default)]
    pub(crate) last_entry_id: i64,
}

impl CacheState {
    /// Whether the freshness window has passed since the last update.
    pub fn is_expired(&self) -> bool {
        match self.last_updated {
            Some(last) => (Utc::now() - last).num_minutes() > CACHE_STALE_MINUTES,
            None => true,
        }
    }

    /// Hand out the next employee id: above both the counter and every id
    /// currently in the roster, so server-assigned and demo ids never repeat.
    pub fn allocate_employee_id(&mut self) -> i64 {
        let highest = self
            .employees
            .as_ref()
            .and_then(|roster| roster.iter().map(|e| e.id).max())
            .unwrap_or(0);

        let id = self
            .next_employee_id
            .max(highest + 1)
            .max(FIRST_EMPLOYEE_ID);
        self.next_employee_id = id + 1;
        id
    }

    /// Stamp an id for a penalty or bonus entry: current Unix milliseconds,
    /// bumped past the previous stamp when two land in the same millisecond.
    pub fn allocate_entry_id(&mut self) -> i64 {
        let stamp = Utc::now().timestamp_millis();
        let id = stamp.max(self.last_entry_id + 1);
        self.last_entry_id = id;
        id
    }

    pub fn employee_mut(&mut self, employee_id: i64) -> Option<&mut Employee> {
        self.employees
            .as_mut()?
            .iter_mut()
            .find(|e| e.id == employee_id)
    }

    pub fn employees_mut(&mut self) -> &mut Vec<Employee> {
        self.employees.get_or_insert_with(Vec::new)
    }

    pub fn hours_mut(&mut self) -> &mut Vec<HoursRecord> {
        self.hours.get_or_insert_with(Vec::new)
    }

    pub fn penalties_mut(&mut self) -> &mut Vec<PenaltyRecord> {
        self.penalties.get_or_insert_with(Vec::new)
    }

    pub fn bonuses_mut(&mut self) -> &mut Vec<BonusRecord> {
        self.bonuses.get_or_insert_with(Vec::new)
    }

    /// Re-point an employee and every dependent record at a new id.
    /// Used when the server assigns the authoritative id to a locally
    /// created employee; without the re-key, hours and adjustment entries
    /// would stay orphaned on the provisional id.
    pub fn rekey_employee(&mut self, old_id: i64, new_id: i64) {
        if old_id == new_id {
            return;
        }

        if let Some(employee) = self.employee_mut(old_id) {
            employee.id = new_id;
        }
        if let Some(hours) = self.hours.as_mut() {
            for record in hours.iter_mut().filter(|h| h.employee_id == old_id) {
                record.employee_id = new_id;
            }
        }
        if let Some(penalties) = self.penalties.as_mut() {
            for record in penalties.iter_mut().filter(|p| p.employee_id == old_id) {
                record.employee_id = new_id;
            }
        }
        if let Some(bonuses) = self.bonuses.as_mut() {
            for record in bonuses.iter_mut().filter(|b| b.employee_id == old_id) {
                record.employee_id = new_id;
            }
        }
    }
}
