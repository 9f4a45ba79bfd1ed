//! HTTP client for the substitution-plan service.
//!
//! The remote API is a black box with three calls: an opaque login exchange
//! returning a session id, a session-validity probe, and the plan fetch.
//! Every request carries the same fixed timeout; exceeding it is treated
//! like any other network failure.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AuthError, CoreError, NetworkError};
use crate::plan::PlanEntry;

/// Fixed timeout for every call against the plan service.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(2500);

/// The remote schedule service, as the core sees it.
#[async_trait]
pub trait ScheduleService: Send + Sync {
    /// Opaque login exchange. Returns the session id on success.
    async fn login(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
        schoolid: &str,
    ) -> Result<String, CoreError>;

    /// Session-validity probe. `Ok(true)` iff the server answered 200.
    async fn probe_session(
        &self,
        server_url: &str,
        session_id: &str,
    ) -> Result<bool, NetworkError>;

    /// Fetch the full plan scoped to one school.
    async fn fetch_plan(
        &self,
        server_url: &str,
        session_id: &str,
        schoolid: &str,
    ) -> Result<Vec<PlanEntry>, CoreError>;
}

/// reqwest-backed implementation of [`ScheduleService`].
pub struct HttpScheduleService {
    client: reqwest::Client,
}

impl HttpScheduleService {
    pub fn new() -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Custom(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn url(server_url: &str, path: &str) -> String {
        format!("{}/api{}", server_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl ScheduleService for HttpScheduleService {
    async fn login(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
        schoolid: &str,
    ) -> Result<String, CoreError> {
        let body = serde_json::json!({
            "username": username,
            "password": password,
            "schoolid": schoolid,
        });

        let resp = self
            .client
            .post(Self::url(server_url, "/login"))
            .json(&body)
            .send()
            .await
            .map_err(NetworkError::from)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%status, "login rejected");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            }
            .into());
        }

        let text = resp.text().await.map_err(NetworkError::from)?;
        extract_session_id(&text).ok_or_else(|| AuthError::MissingSessionId.into())
    }

    async fn probe_session(
        &self,
        server_url: &str,
        session_id: &str,
    ) -> Result<bool, NetworkError> {
        let resp = self
            .client
            .get(Self::url(server_url, "/isValidSession"))
            .query(&[("sid", session_id)])
            .send()
            .await?;

        Ok(resp.status() == reqwest::StatusCode::OK)
    }

    async fn fetch_plan(
        &self,
        server_url: &str,
        session_id: &str,
        schoolid: &str,
    ) -> Result<Vec<PlanEntry>, CoreError> {
        let resp = self
            .client
            .get(Self::url(server_url, "/plan"))
            .query(&[("sid", session_id), ("schoolid", schoolid)])
            .send()
            .await
            .map_err(NetworkError::from)?
            .error_for_status()
            .map_err(NetworkError::from)?;

        let entries = resp
            .json::<Vec<PlanEntry>>()
            .await
            .map_err(NetworkError::from)?;
        tracing::debug!(count = entries.len(), "plan fetched");
        Ok(entries)
    }
}

/// Pull the session id out of the login response body.
///
/// The exchange is opaque: some instances answer with a bare token, some
/// with `{"sid": "..."}`.
fn extract_session_id(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(sid) = value.get("sid").and_then(|v| v.as_str()) {
            return Some(sid.to_string());
        }
        if let Some(sid) = value.as_str() {
            return Some(sid.to_string());
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
