//! HTTP client for the optional HR backend.
//!
//! This module provides the `ApiClient` struct, with one method per backend
//! endpoint under the configured base URL. The store treats every call as
//! advisory: failures are logged and masked, local state stays authoritative.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::models::{
    BonusRecord, DashboardSummary, Employee, EmployeeUpdate, HoursRecord, NewEmployee,
    PenaltyRecord,
};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the HR backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// POST where the response body is irrelevant to the caller.
    async fn post_and_forget<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }

    /// PUT where the response body is irrelevant to the caller.
    async fn put_and_forget<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send PUT request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Data Fetching Methods =====

    /// Fetch the dashboard summary.
    pub async fn fetch_dashboard(&self) -> Result<DashboardSummary> {
        self.get("/dashboard").await
    }

    /// Fetch the full employee roster.
    pub async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        self.get("/employees").await
    }

    /// Fetch the hours record for one employee.
    pub async fn fetch_hours(&self, employee_id: i64) -> Result<HoursRecord> {
        self.get(&format!("/hours/{}", employee_id)).await
    }

    // ===== Write Methods =====

    /// Register a new employee. The server assigns the authoritative id.
    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        self.post("/employees", employee).await
    }

    /// Push a partial employee update.
    pub async fn update_employee(
        &self,
        employee_id: i64,
        changes: &EmployeeUpdate,
    ) -> Result<()> {
        self.put_and_forget(&format!("/employees/{}", employee_id), changes)
            .await
    }

    /// Push the merged hours record for one employee.
    pub async fn record_hours(&self, employee_id: i64, hours: &HoursRecord) -> Result<()> {
        self.post_and_forget(&format!("/hours/{}", employee_id), hours)
            .await
    }

    /// Push a penalty entry.
    pub async fn record_penalty(&self, employee_id: i64, penalty: &PenaltyRecord) -> Result<()> {
        self.post_and_forget(&format!("/employees/{}/penalties", employee_id), penalty)
            .await
    }

    /// Push a bonus entry.
    pub async fn record_bonus(&self, employee_id: i64, bonus: &BonusRecord) -> Result<()> {
        self.post_and_forget(&format!("/employees/{}/bonuses", employee_id), bonus)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped_from_base_url() {
        let client = ApiClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(client.url("/employees"), "http://localhost:8080/api/employees");
    }
}
