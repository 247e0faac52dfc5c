use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::models::TransportError;

/// Status and body of one HTTP exchange, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A single GET attempt. Any response whose status arrived is `Ok`; `Err` is
/// reserved for failures before that point, or while reading a 200 body.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Connection-pooled reqwest client shared by every lookup.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(http_client, user_agent))
    }

    pub fn with_client(http_client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            http_client,
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .http_client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status().as_u16();
        // A non-200 status is already the answer; its body is only diagnostics.
        let body = if status == 200 {
            response.text().await?
        } else {
            response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e))
        };

        Ok(HttpResponse { status, body })
    }
}
