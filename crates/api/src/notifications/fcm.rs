//! Firebase Cloud Messaging push delivery.
//!
//! [`FcmClient`] POSTs one message per device token to the FCM v1 send
//! endpoint. Failures are logged and swallowed by the caller; a push that
//! never arrives only degrades to in-app notifications, which are persisted
//! independently.

use std::time::Duration;

use serde_json::json;

/// HTTP request timeout for a single send attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// FCM configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// Full URL of the FCM v1 `messages:send` endpoint for the project.
    pub endpoint: String,
    /// OAuth2 bearer token used to authorize send requests.
    pub auth_token: String,
}

impl FcmConfig {
    /// Load FCM configuration from environment variables.
    ///
    /// | Env Var          | Required |
    /// |------------------|----------|
    /// | `FCM_ENDPOINT`   | yes      |
    /// | `FCM_AUTH_TOKEN` | yes      |
    ///
    /// Returns `None` when either variable is unset, which disables push
    /// delivery entirely.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("FCM_ENDPOINT").ok()?;
        let auth_token = std::env::var("FCM_AUTH_TOKEN").ok()?;
        Some(Self {
            endpoint,
            auth_token,
        })
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for push delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum FcmError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// FCM returned a non-2xx status code.
    #[error("FCM returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// FcmClient
// ---------------------------------------------------------------------------

/// Sends push messages to device tokens via FCM.
pub struct FcmClient {
    client: reqwest::Client,
    config: FcmConfig,
}

impl FcmClient {
    /// Create a new client with a pre-configured HTTP client.
    pub fn new(config: FcmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Send a single push message to one device token.
    pub async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        data: &serde_json::Value,
    ) -> Result<(), FcmError> {
        let payload = json!({
            "message": {
                "token": device_token,
                "notification": {
                    "title": title,
                    "body": body,
                },
                "data": data,
            }
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.auth_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FcmError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}
