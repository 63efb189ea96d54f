//! The cache store: single source of truth for HR data within a session.
//!
//! Reads serve cached data while it is fresh, fall back to the configured
//! backend, and fabricate placeholder data when no backend is reachable.
//! Writes commit locally first; remote sync is advisory and never rolls
//! back a committed mutation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::cache::{CacheState, CacheStorage};
use crate::config::{StoreConfig, StoreOptions};
use crate::error::StoreError;
use crate::models::{
    AdjustmentInput, BonusRecord, DashboardSummary, Employee, EmployeeUpdate, HoursRecord,
    HoursUpdate, NewEmployee, PenaltyRecord,
};

/// Buffer size for the update notification channel.
/// Slow subscribers lag rather than block mutations.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Outcome handle for a best-effort remote sync.
///
/// The local mutation is already committed when the handle is returned.
/// Dropping it detaches the task; awaiting `finished` reports whether the
/// remote accepted the write.
#[derive(Debug)]
pub struct RemoteSync {
    handle: Option<JoinHandle<bool>>,
}

impl RemoteSync {
    /// No task was spawned (no remote endpoint configured).
    fn skipped() -> Self {
        Self { handle: None }
    }

    fn spawned(handle: JoinHandle<bool>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// True when the remote accepted the write. False when no remote is
    /// configured or the call failed; either way local state stands.
    pub async fn finished(self) -> bool {
        match self.handle {
            Some(handle) => handle.await.unwrap_or(false),
            None => false,
        }
    }
}

/// Session-local cache of HR data.
///
/// One instance owns one [`CacheState`]; construct it explicitly and hand it
/// to whoever needs it. There is no ambient global.
pub struct CacheStore {
    config: StoreConfig,
    api: ApiClient,
    storage: CacheStorage,
    state: CacheState,
    updates: broadcast::Sender<Option<DateTime<Utc>>>,
}

impl CacheStore {
    /// Create a store backed by the platform cache directory, rehydrating
    /// persisted state when persistence is enabled.
    pub fn new(config: StoreConfig) -> Result<Self> {
        Self::with_storage(config, CacheStorage::new()?)
    }

    /// Create a store over an explicit storage root.
    pub fn with_storage(config: StoreConfig, storage: CacheStorage) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url)?;

        let state = if config.enable_persistence {
            match storage.load(&config.storage_key) {
                Ok(Some(state)) => state,
                Ok(None) => CacheState::default(),
                Err(e) => {
                    warn!(error = %e, "Failed to rehydrate cache state, starting empty");
                    CacheState::default()
                }
            }
        } else {
            CacheState::default()
        };

        let (updates, _) = broadcast::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            api,
            storage,
            state,
            updates,
        })
    }

    /// Subscribe to mutation notifications. Each message carries the new
    /// last-updated timestamp (`None` after a cache clear).
    pub fn subscribe(&self) -> broadcast::Receiver<Option<DateTime<Utc>>> {
        self.updates.subscribe()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.last_updated
    }

    /// All penalty entries, oldest first.
    pub fn penalties(&self) -> &[PenaltyRecord] {
        self.state.penalties.as_deref().unwrap_or_default()
    }

    /// All bonus entries, oldest first.
    pub fn bonuses(&self) -> &[BonusRecord] {
        self.state.bonuses.as_deref().unwrap_or_default()
    }

    /// All hours records currently cached.
    pub fn hours(&self) -> &[HoursRecord] {
        self.state.hours.as_deref().unwrap_or_default()
    }

    // ===== Read Operations =====

    /// Dashboard summary: cached while fresh, else fetched, else fabricated.
    /// Never fails; remote errors are logged and masked.
    pub async fn dashboard_summary(&mut self) -> DashboardSummary {
        if let Some(ref dashboard) = self.state.dashboard {
            if !self.state.is_expired() {
                return dashboard.clone();
            }
        }

        let summary = if self.config.has_remote() {
            match self.api.fetch_dashboard().await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!(error = %e, "Failed to fetch dashboard, using placeholder");
                    DashboardSummary::placeholder()
                }
            }
        } else {
            debug!("No remote endpoint configured, fabricating dashboard");
            DashboardSummary::placeholder()
        };

        self.state.dashboard = Some(summary.clone());
        self.commit();
        summary
    }

    /// Employee roster: cached while fresh, else fetched, else the demo
    /// roster. A refresh overwrites the whole collection.
    pub async fn employees(&mut self) -> Vec<Employee> {
        if let Some(ref employees) = self.state.employees {
            if !self.state.is_expired() {
                return employees.clone();
            }
        }

        let roster = if self.config.has_remote() {
            match self.api.fetch_employees().await {
                Ok(roster) => roster,
                Err(e) => {
                    warn!(error = %e, "Failed to fetch employees, using demo roster");
                    Employee::demo_roster()
                }
            }
        } else {
            debug!("No remote endpoint configured, using demo roster");
            Employee::demo_roster()
        };

        self.state.employees = Some(roster.clone());
        self.commit();
        roster
    }

    /// Hours for one employee. A miss creates and stores a zero-valued
    /// record, so the call is idempotent: later calls return that record.
    pub async fn hours_for_employee(&mut self, employee_id: i64) -> HoursRecord {
        if let Some(record) = self
            .state
            .hours
            .as_ref()
            .and_then(|hours| hours.iter().find(|h| h.employee_id == employee_id))
        {
            return record.clone();
        }

        let record = if self.config.has_remote() {
            match self.api.fetch_hours(employee_id).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(employee_id, error = %e, "Failed to fetch hours, storing zero record");
                    HoursRecord::zeroed(employee_id)
                }
            }
        } else {
            HoursRecord::zeroed(employee_id)
        };

        self.state.hours_mut().push(record.clone());
        self.commit();
        record
    }

    // ===== Write Operations =====

    /// Add an employee with a locally assigned id and a matching zero-valued
    /// hours record. When a remote is configured the server's response wins:
    /// its fields (id included) overwrite the local record, and records
    /// keyed by the provisional id are re-keyed to the server id.
    pub async fn add_employee(&mut self, new: NewEmployee) -> Employee {
        let local_id = self.state.allocate_employee_id();
        let mut employee = Employee::from_new(local_id, new.clone());

        self.state.employees_mut().push(employee.clone());
        self.state.hours_mut().push(HoursRecord::zeroed(local_id));
        // Later penalty/bonus appends expect the collections initialized
        self.state.penalties_mut();
        self.state.bonuses_mut();

        if self.config.has_remote() {
            match self.api.create_employee(&new).await {
                Ok(remote) => {
                    self.state.rekey_employee(local_id, remote.id);
                    if let Some(slot) = self.state.employee_mut(remote.id) {
                        *slot = remote.clone();
                    }
                    employee = remote;
                }
                Err(e) => {
                    warn!(error = %e, "Remote rejected new employee, keeping local record");
                }
            }
        }

        self.commit();
        employee
    }

    /// Merge the provided fields into an existing employee.
    /// Fails with [`StoreError::EmployeeNotFound`] when the id is unknown.
    pub async fn update_employee(
        &mut self,
        employee_id: i64,
        changes: EmployeeUpdate,
    ) -> std::result::Result<(Employee, RemoteSync), StoreError> {
        let employee = match self.state.employee_mut(employee_id) {
            Some(employee) => {
                employee.apply(&changes);
                employee.clone()
            }
            None => return Err(StoreError::EmployeeNotFound(employee_id)),
        };

        self.commit();
        let sync = self.spawn_sync(move |api| async move {
            api.update_employee(employee_id, &changes).await
        });
        Ok((employee, sync))
    }

    /// Upsert hours by employee id: provided fields overwrite, missing
    /// fields keep their existing value (zero on first insert).
    pub async fn add_hours(&mut self, employee_id: i64, update: HoursUpdate) -> RemoteSync {
        let hours = self.state.hours_mut();
        let record = match hours.iter_mut().find(|h| h.employee_id == employee_id) {
            Some(existing) => {
                existing.apply(&update);
                existing.clone()
            }
            None => {
                let record = HoursRecord::from_update(employee_id, &update);
                hours.push(record.clone());
                record
            }
        };

        self.commit();
        self.spawn_sync(move |api| async move { api.record_hours(employee_id, &record).await })
    }

    /// Append a penalty entry. A matching employee gets its count bumped
    /// and its total accumulated; a missing employee is tolerated.
    pub async fn add_penalty(&mut self, employee_id: i64, input: AdjustmentInput) -> RemoteSync {
        let record = PenaltyRecord {
            id: self.state.allocate_entry_id(),
            employee_id,
            amount: input.amount.unwrap_or(0.0),
            reason: input.reason,
            date: Utc::now(),
        };
        self.state.penalties_mut().push(record.clone());

        if let Some(employee) = self.state.employee_mut(employee_id) {
            employee.penalties += 1;
            employee.total_penalties += record.amount;
        }

        self.commit();
        self.spawn_sync(move |api| async move { api.record_penalty(employee_id, &record).await })
    }

    /// Append a bonus entry. Same counter rules as [`Self::add_penalty`].
    pub async fn add_bonus(&mut self, employee_id: i64, input: AdjustmentInput) -> RemoteSync {
        let record = BonusRecord {
            id: self.state.allocate_entry_id(),
            employee_id,
            amount: input.amount.unwrap_or(0.0),
            reason: input.reason,
            date: Utc::now(),
        };
        self.state.bonuses_mut().push(record.clone());

        if let Some(employee) = self.state.employee_mut(employee_id) {
            employee.bonuses += 1;
            employee.total_bonuses += record.amount;
        }

        self.commit();
        self.spawn_sync(move |api| async move { api.record_bonus(employee_id, &record).await })
    }

    /// Reset every collection to absent and erase the persisted blob.
    pub fn clear_cache(&mut self) {
        self.state = CacheState::default();
        if let Err(e) = self.storage.erase(&self.config.storage_key) {
            warn!(error = %e, "Failed to erase persisted cache state");
        }
        self.notify();
    }

    /// Merge runtime options and persist immediately. An endpoint change
    /// rebuilds the HTTP client; a rebuild failure keeps the previous one.
    pub fn set_options(&mut self, options: StoreOptions) {
        let endpoint_changed = options
            .api_base_url
            .as_ref()
            .map(|url| *url != self.config.api_base_url)
            .unwrap_or(false);

        self.config.apply(options);

        if endpoint_changed {
            match ApiClient::new(&self.config.api_base_url) {
                Ok(api) => self.api = api,
                Err(e) => {
                    warn!(error = %e, "Failed to rebuild API client, keeping previous endpoint")
                }
            }
        }

        self.persist();
    }

    // ===== Internals =====

    /// Stamp, persist, notify. Every mutating operation ends here.
    fn commit(&mut self) {
        self.state.last_updated = Some(Utc::now());
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        if !self.config.enable_persistence {
            return;
        }
        if let Err(e) = self.storage.save(&self.config.storage_key, &self.state) {
            warn!(error = %e, "Failed to persist cache state");
        }
    }

    fn notify(&self) {
        // Send only fails when nobody is subscribed
        let _ = self.updates.send(self.state.last_updated);
    }

    /// Spawn an advisory remote write. The outcome never affects committed
    /// local state; failures are logged inside the task.
    fn spawn_sync<F, Fut>(&self, call: F) -> RemoteSync
    where
        F: FnOnce(ApiClient) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        if !self.config.has_remote() {
            return RemoteSync::skipped();
        }

        let api = self.api.clone();
        RemoteSync::spawned(tokio::spawn(async move {
            match call(api).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Advisory remote sync failed");
                    false
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use chrono::Duration;

    fn test_store() -> (CacheStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = CacheStorage::with_dir(dir.path().to_path_buf()).unwrap();
        let config = StoreConfig {
            enable_persistence: false,
            ..Default::default()
        };
        (CacheStore::with_storage(config, storage).unwrap(), dir)
    }

    fn ann() -> NewEmployee {
        NewEmployee {
            fullname: "Ann".to_string(),
            status: EmployeeStatus::Hired,
            salary: 40000.0,
            penalties: None,
            bonuses: None,
        }
    }

    #[tokio::test]
    async fn test_dashboard_is_stable_within_freshness_window() {
        let (mut store, _dir) = test_store();

        let first = store.dashboard_summary().await;
        let second = store.dashboard_summary().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_dashboard_regenerates_after_expiry() {
        let (mut store, _dir) = test_store();

        store.dashboard_summary().await;
        let aged = Utc::now() - Duration::minutes(6);
        store.state.last_updated = Some(aged);

        store.dashboard_summary().await;
        // The freshness stamp was renewed, so a regeneration happened
        assert!(store.last_updated().unwrap() > aged);
    }

    #[tokio::test]
    async fn test_employees_fall_back_to_demo_roster() {
        let (mut store, _dir) = test_store();

        let roster = store.employees().await;
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].fullname, "John Doe");
    }

    #[tokio::test]
    async fn test_local_ids_continue_above_roster() {
        let (mut store, _dir) = test_store();

        store.employees().await;
        let employee = store.add_employee(ann()).await;
        assert_eq!(employee.id, 5);
    }

    #[tokio::test]
    async fn test_update_employee_unknown_id_fails() {
        let (mut store, _dir) = test_store();

        let result = store
            .update_employee(999, EmployeeUpdate::default())
            .await;
        assert!(matches!(result, Err(StoreError::EmployeeNotFound(999))));
    }

    #[tokio::test]
    async fn test_update_employee_merges_fields() {
        let (mut store, _dir) = test_store();

        let employee = store.add_employee(ann()).await;
        let (updated, _sync) = store
            .update_employee(
                employee.id,
                EmployeeUpdate {
                    salary: Some(45000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.salary, 45000.0);
        assert_eq!(updated.fullname, "Ann");
    }

    #[tokio::test]
    async fn test_penalty_on_missing_employee_still_appends() {
        let (mut store, _dir) = test_store();

        let sync = store
            .add_penalty(
                777,
                AdjustmentInput {
                    amount: Some(5.0),
                    reason: None,
                },
            )
            .await;

        assert_eq!(store.penalties().len(), 1);
        // No remote configured, so the sync was skipped
        assert!(!sync.finished().await);
    }

    #[tokio::test]
    async fn test_clear_cache_resets_everything() {
        let (mut store, _dir) = test_store();

        store.employees().await;
        store.dashboard_summary().await;
        store.clear_cache();

        assert!(store.last_updated().is_none());
        assert!(store.penalties().is_empty());
        assert!(store.hours().is_empty());
        assert!(store.state.employees.is_none());
        assert!(store.state.dashboard.is_none());
    }

    #[tokio::test]
    async fn test_set_options_moves_blob_to_new_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CacheStorage::with_dir(dir.path().to_path_buf()).unwrap();
        let mut store =
            CacheStore::with_storage(StoreConfig::default(), storage.clone()).unwrap();

        store.set_options(StoreOptions {
            storage_key: Some("relocated".to_string()),
            ..Default::default()
        });
        store.employees().await;

        assert!(storage.load("relocated").unwrap().is_some());
    }
}
