use crate::core::document::Document;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Browser-like; the site turns away clients that announce a scripting library.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:66.0) Gecko/20100101 Firefox/66.0";

/// GETs pages with a fixed header set. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().default_headers(default_headers(user_agent)?);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| EtlError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client })
    }
}

fn default_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));

    let agent = HeaderValue::from_str(user_agent).map_err(|e| EtlError::InvalidConfigValueError {
        field: "source.user_agent".to_string(),
        value: user_agent.to_string(),
        reason: e.to_string(),
    })?;
    headers.insert(USER_AGENT, agent);

    Ok(headers)
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Document> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| EtlError::FetchError {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("Response status for {}: {}", url, status);
        if status.is_client_error() || status.is_server_error() {
            return Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| EtlError::FetchError {
            url: url.to_string(),
            source,
        })?;

        Ok(Document::parse(&body))
    }
}
