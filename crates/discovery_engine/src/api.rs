use std::time::Duration;

use discovery_core::DiscoveryParams;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ActivityEnvelope, ApiError, DiscoverEnvelope, FailureKind};

const DISCOVER_PATH: &str = "v1/discover";
const ACTIVITIES_PATH: &str = "v1/activities";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string()],
        }
    }
}

/// Remote source of feed pages and the activity feed.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn fetch_projects(&self, params: &DiscoveryParams) -> Result<DiscoverEnvelope, ApiError>;

    async fn fetch_activities(&self) -> Result<ActivityEnvelope, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base = settings.base_url.clone();
        // `Url::join` drops the last path segment unless it ends with a slash.
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !self.is_content_type_allowed(ct) {
                return Err(ApiError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn fetch_projects(&self, params: &DiscoveryParams) -> Result<DiscoverEnvelope, ApiError> {
        let mut url = self.endpoint(DISCOVER_PATH)?;
        {
            let query = params.query_params();
            if !query.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in &query {
                    pairs.append_pair(key, value);
                }
            }
        }
        self.get_json(url).await
    }

    async fn fetch_activities(&self) -> Result<ActivityEnvelope, ApiError> {
        let url = self.endpoint(ACTIVITIES_PATH)?;
        self.get_json(url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
