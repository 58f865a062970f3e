//! Contact API client - health check and contact submission

use reqwest::Client;
use std::time::Duration;

use crate::constants::{CONTACT_PATH, HEALTH_PATH, REQUEST_TIMEOUT};
use crate::models::{ApiErrorBody, ContactForm, ContactResponse, HealthResponse};

/// Failure of a single API call; callers decide what it means for the UI
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("Request timed out ({}s)", REQUEST_TIMEOUT.as_secs()))
        } else if e.is_connect() {
            ApiError::Transport(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(format!("Request failed: {}", e))
        }
    }
}

/// Thin wrapper around the two backend endpoints
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/health`. Any transport failure, non-2xx status or
    /// undecodable body is an error; interpreting it is up to the caller.
    pub async fn check_health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<HealthResponse>().await?)
    }

    /// `POST /api/contact` with the four form fields as JSON
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactResponse, ApiError> {
        let response = self
            .client
            .post(self.url(CONTACT_PATH))
            .json(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(ContactResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Turn a non-2xx response into `ApiError::Status`, keeping the server's message
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        });

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
