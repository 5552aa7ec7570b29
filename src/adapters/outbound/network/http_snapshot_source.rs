use crate::ports::outbound::{FetchOutcome, SnapshotSource};
use crate::shared::error::SyncError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_STATE_PATH: &str = "/api/state";
pub const DEFAULT_PROBE_PATH: &str = "/api/mtime";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ProbeBody {
    timestamp: Value,
}

/// HttpSnapshotSource adapter talking to the producer over HTTP
///
/// The probe hits a cheap endpoint returning `{ "timestamp": ... }`; the
/// fetch retrieves the full snapshot and is made conditional with
/// `If-None-Match` once a change token is known.
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    state_url: Url,
    probe_url: Url,
}

impl HttpSnapshotSource {
    /// Creates a source with the default endpoint paths and timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(
            base_url,
            DEFAULT_STATE_PATH,
            DEFAULT_PROBE_PATH,
            DEFAULT_REQUEST_TIMEOUT,
        )
    }

    pub fn with_options(
        base_url: &str,
        state_path: &str,
        probe_path: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let user_agent = format!("preflight-dash/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            state_url: Self::endpoint(base_url, state_path)?,
            probe_url: Self::endpoint(base_url, probe_path)?,
        })
    }

    fn endpoint(base_url: &str, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let url = Url::parse(&joined)
            .map_err(|e| anyhow::anyhow!("Invalid producer URL '{}': {}", joined, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported URL scheme '{}' in {}", url.scheme(), joined);
        }
        Ok(url)
    }

    pub fn state_url(&self) -> &Url {
        &self.state_url
    }

    pub fn probe_url(&self) -> &Url {
        &self.probe_url
    }

    fn marker_from(value: Value) -> std::result::Result<String, SyncError> {
        match value {
            Value::String(s) if !s.is_empty() => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(SyncError::probe(
                None,
                format!("unexpected timestamp value: {}", other),
            )),
        }
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn probe(&self) -> std::result::Result<String, SyncError> {
        let response = self
            .client
            .get(self.probe_url.clone())
            .send()
            .await
            .map_err(|e| SyncError::probe(None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::probe(
                Some(status.as_u16()),
                format!("{} returned status code {}", self.probe_url, status),
            ));
        }

        let body: ProbeBody = response
            .json()
            .await
            .map_err(|e| SyncError::probe(Some(status.as_u16()), e.to_string()))?;
        Self::marker_from(body.timestamp)
    }

    async fn fetch(
        &self,
        if_none_match: Option<&str>,
    ) -> std::result::Result<FetchOutcome, SyncError> {
        let mut request = self.client.get(self.state_url.clone());
        if let Some(token) = if_none_match {
            request = request.header(IF_NONE_MATCH, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::fetch(None, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_MODIFIED {
            return Ok(FetchOutcome::NotModified);
        }
        if !status.is_success() {
            return Err(SyncError::fetch(
                Some(status.as_u16()),
                format!("{} returned status code {}", self.state_url, status),
            ));
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::fetch(Some(status.as_u16()), e.to_string()))?;

        Ok(FetchOutcome::Modified {
            body: body.to_vec(),
            etag,
        })
    }
}
