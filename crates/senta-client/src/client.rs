//! HTTP client for the process API.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode};
use senta_core::Settings;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{RemoteError, Result};
use crate::models::{ActionResult, ProcessAction, RemoteProcess};

/// Body the server sends when an action targets a process it does not run.
pub const PROCESS_NOT_FOUND_BODY: &str = "try to stop nil cmd process";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "api_key";

/// Operations the bot needs from the process API.
#[async_trait]
pub trait ProcessApi: Send + Sync {
    /// List all processes with their current state.
    async fn list_processes(&self) -> Result<Vec<RemoteProcess>>;

    /// Start, stop or restart a process.
    async fn perform_action(&self, action: ProcessAction, id: u64) -> Result<ActionResult>;
}

/// reqwest-backed client for the process API.
#[derive(Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    /// Create a client for `server` (the host root, without `/rest/api/v1`).
    pub fn new(server: impl AsRef<str>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(
            format!(
                "{}/{}",
                server.as_ref().trim_end_matches('/'),
                senta_core::API_URL_SUFFIX
            ),
            api_key,
        )
    }

    /// Create a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_base_url(settings.api_base_url(), settings.api_token.clone())
    }

    fn with_base_url(base_url: String, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Root URL every endpoint is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /process/list/status`.
    pub async fn list_processes(&self) -> Result<Vec<RemoteProcess>> {
        let url = format!("{}/process/list/status", self.base_url);
        debug!(url = %url, "Listing processes");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Failed to send request");
                RemoteError::from(e)
            })?;

        let body = read_success_body(response).await?;
        let processes: Vec<RemoteProcess> = decode(&body)?;
        debug!(count = processes.len(), "Processes listed");
        Ok(processes)
    }

    /// `POST /process/{id}/{action}`.
    pub async fn perform_action(&self, action: ProcessAction, id: u64) -> Result<ActionResult> {
        let url = format!("{}/process/{}/{}", self.base_url, id, action);
        debug!(url = %url, action = %action, id, "Sending process action");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Failed to send request");
                RemoteError::from(e)
            })?;

        let body = match read_success_body(response).await {
            Ok(body) => body,
            Err(RemoteError::Status { body, .. }) if body.trim() == PROCESS_NOT_FOUND_BODY => {
                debug!(action = %action, id, "Remote reported unknown process");
                return Err(RemoteError::ProcessNotFound);
            }
            Err(e) => return Err(e),
        };

        decode(&body)
    }
}

#[async_trait]
impl ProcessApi for RemoteClient {
    async fn list_processes(&self) -> Result<Vec<RemoteProcess>> {
        RemoteClient::list_processes(self).await
    }

    async fn perform_action(&self, action: ProcessAction, id: u64) -> Result<ActionResult> {
        RemoteClient::perform_action(self, action, id).await
    }
}

/// Read the body, failing with [`RemoteError::Status`] unless the status is 200 or 201.
async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::OK || status == StatusCode::CREATED {
        return Ok(body);
    }

    warn!(status = %status, body = %body.trim(), "Request failed");
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to decode response");
        RemoteError::Decode(e.to_string())
    })
}
