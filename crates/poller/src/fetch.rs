//! HTTP transport seam for the homework API.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// A GET request as the poll cycle describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw answer from the server; the status code is not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Final request URL, query string included.
    pub url: String,
    pub body: Vec<u8>,
}

/// The request never produced a response (DNS, connect, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, TransportError>;
}

/// [`HttpFetch`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestFetcher {
    http: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, TransportError> {
        let mut builder = self.http.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let resp = builder.send().await.map_err(error_chain)?;
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let body = resp.bytes().await.map_err(error_chain)?.to_vec();

        tracing::debug!(status, url = %url, bytes = body.len(), "API response received");

        Ok(FetchResponse { status, url, body })
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: reqwest::Error) -> TransportError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TransportError(message)
}
