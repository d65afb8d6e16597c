//! Remote quote endpoint
//!
//! The remote is an opaque JSON endpoint: `GET` returns an array of post
//! objects with a `title` field, `POST` accepts a `{text, category}` body.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{QuoteError, QuoteResult};
use crate::models::Quote;

/// A record fetched from the remote
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemotePost {
    /// The post title, if the record had a string `title`
    pub title: Option<String>,
}

impl RemotePost {
    #[cfg(test)]
    pub(crate) fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Read a post from an arbitrary JSON value, ignoring other fields
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: value
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// Read/write access to the remote quote collection
#[async_trait]
pub trait RemoteQuotes: Send + Sync {
    /// Fetch the remote collection
    async fn fetch(&self) -> QuoteResult<Vec<RemotePost>>;

    /// Submit a single quote
    async fn push(&self, quote: &Quote) -> QuoteResult<()>;
}

/// HTTP client for the remote endpoint
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    url: String,
}

impl HttpRemote {
    /// Create a client for `url` with a request timeout
    pub fn new(url: &str, timeout: Duration) -> QuoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quotebook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &Config) -> QuoteResult<Self> {
        Self::new(&config.remote_url, config.request_timeout())
    }
}

#[async_trait]
impl RemoteQuotes for HttpRemote {
    async fn fetch(&self) -> QuoteResult<Vec<RemotePost>> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::network(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }

        let body: Value = response.json().await?;
        match body {
            Value::Array(items) => Ok(items.iter().map(RemotePost::from_value).collect()),
            _ => Err(QuoteError::network(format!(
                "GET {} did not return a JSON array",
                self.url
            ))),
        }
    }

    async fn push(&self, quote: &Quote) -> QuoteResult<()> {
        debug!("POST {}", self.url);
        let response = self.client.post(&self.url).json(quote).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::network(format!(
                "POST {} returned {}",
                self.url, status
            )));
        }
        Ok(())
    }
}
