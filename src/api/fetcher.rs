use std::sync::Arc;
use tracing::debug;

use crate::api::resilience::{retry_with_backoff_if, RetryPolicy};
use crate::api::transport::HttpTransport;
use crate::models::{ApiResponse, FetchError, TransportError};

/// Fetches and decodes one leaderboard page. Only transient transport
/// failures are retried; a non-200 status or an undecodable body fails on the spot.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn HttpTransport>,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub async fn fetch(&self, url: &str) -> Result<ApiResponse, FetchError> {
        debug!("GET {}", url);

        let response = retry_with_backoff_if(
            &self.retry,
            url,
            TransportError::is_transient,
            || self.transport.get(url),
        )
        .await
        .map_err(|source| {
            if source.is_transient() {
                FetchError::RetriesExhausted {
                    url: url.to_string(),
                    attempts: self.retry.attempts(),
                    source,
                }
            } else {
                FetchError::Rejected {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        if response.status != 200 {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                code: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
