//! Page API client: creates password-protected kostnadsfri pages on SajtMaskin.
//!
//! Calls are single-shot. Page creation is not idempotent, so a failed call is
//! reported to the operator rather than retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum PageApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("API reported success but returned no page")]
    MissingPage,
}

/// Body of `POST /api/kostnadsfri`. Absent fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

/// The page as stored by the backend. The backend may normalise the slug or
/// password differently from what was sent, so callers print these values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPage {
    pub slug: String,
    pub password: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CreatePageResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    page: Option<CreatedPage>,
}

/// Anything that can create pages. The HTTP client in production, stubs in tests.
#[async_trait]
pub trait PageApi: Send + Sync {
    async fn create_page(&self, request: &CreatePageRequest) -> Result<CreatedPage, PageApiError>;
}

#[derive(Clone)]
pub struct PageApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl PageApiClient {
    pub fn new(endpoint: String, api_key: String) -> Result<Self, PageApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl PageApi for PageApiClient {
    async fn create_page(&self, request: &CreatePageRequest) -> Result<CreatedPage, PageApiError> {
        debug!(company = %request.company_name, endpoint = %self.endpoint, "Creating kostnadsfri page");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let parsed = match serde_json::from_str::<CreatePageResponse>(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(PageApiError::Parse(e)),
            Err(_) => {
                warn!("Page API returned {}: {}", status, body);
                return Err(PageApiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }
        };

        if !status.is_success() || !parsed.success {
            return Err(PageApiError::Api {
                status: status.as_u16(),
                message: parsed.error.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        parsed.page.ok_or(PageApiError::MissingPage)
    }
}
