// src/fetch/http.rs

use std::future::Future;
use std::pin::Pin;

use reqwest::Client;
use tracing::{debug, info};

use crate::errors::{Result, WccError};

use super::Fetcher;

const USER_AGENT: &str = concat!("wcc/", env!("CARGO_PKG_VERSION"));

/// Plain HTTP(S) GET with the transport's default timeouts and no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WccError::Other(e.into()))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            info!(url, "requesting");
            let fetch_error = |reason: String| WccError::FetchError {
                url: url.to_string(),
                reason,
            };

            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| fetch_error(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(fetch_error(format!("server returned {status}")));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| fetch_error(e.to_string()))?;
            debug!(url, %status, bytes = body.len(), "response received");

            Ok(body.to_vec())
        })
    }
}
