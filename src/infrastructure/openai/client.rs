//! Shared HTTP client for OpenAI-compatible APIs.

use std::time::Duration;

use reqwest::{header, Client as ReqwestClient};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::errors::OpenAiError;
use super::retry::RetryPolicy;

/// Shared HTTP client for OpenAI-compatible endpoints.
///
/// Holds a pooled `reqwest::Client`, the bearer credential and the retry
/// policy. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http_client: ReqwestClient,
    base_url: String,
    api_key: Option<String>,
    retry_policy: RetryPolicy,
}

impl OpenAiClient {
    /// Build a client. `api_key` falls back to `OPENAI_API_KEY`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
        retry_policy: RetryPolicy,
    ) -> Result<Self, OpenAiError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok());

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            retry_policy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// POST `body` as JSON to `{base_url}/{path}`, retrying transient
    /// failures.
    pub async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, OpenAiError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let api_key = self.api_key.as_deref().ok_or(OpenAiError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        self.retry_policy
            .execute(|| self.send_once(&url, api_key, body))
            .await
    }

    async fn send_once<Req, Resp>(
        &self,
        url: &str,
        api_key: &str,
        body: &Req,
    ) -> Result<Resp, OpenAiError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        debug!(url, "sending request");
        let response = self
            .http_client
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {api_key}"))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(OpenAiError::from_status(status, text));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| OpenAiError::MalformedResponse(e.to_string()))
    }
}
