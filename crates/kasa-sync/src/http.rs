//! HTTP client shared by the remainder catalog and the sale sink.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::KasaConfig;
use crate::error::{SyncError, SyncResult};

/// Thin JSON client over `reqwest` with bearer auth and status mapping.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    token: Option<String>,
    timeout_secs: u64,
}

impl ApiClient {
    /// Builds a client with the configured timeout and token.
    pub fn new(config: &KasaConfig) -> SyncResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SyncError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: config.token().map(str::to_string),
            timeout_secs: config.catalog.request_timeout_secs,
        })
    }

    /// GET `url`, returning the decoded JSON body.
    pub async fn get_json(&self, url: Url) -> SyncResult<Value> {
        self.send(self.client.get(url)).await
    }

    /// POST `body` as JSON to `url`, returning the decoded JSON body.
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> SyncResult<Value> {
        self.send(self.client.post(url).json(body)).await
    }

    async fn send(&self, mut request: RequestBuilder) -> SyncResult<Value> {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(status_error(status, text));
        }

        // An empty 2xx body is a valid acknowledgement.
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn transport_error(&self, err: reqwest::Error) -> SyncError {
        if err.is_timeout() {
            SyncError::Timeout(self.timeout_secs)
        } else {
            err.into()
        }
    }
}

/// Maps a non-success status to the matching error.
fn status_error(status: StatusCode, body: String) -> SyncError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SyncError::Unauthorized(body),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            SyncError::Rejected(body)
        }
        other => SyncError::ServerError {
            status: other.as_u16(),
            body,
        },
    }
}
