//! One poll cycle: fetch → decode → validate → render.

use serde_json::Value;

use hw_common::error::CheckError;
use hw_engine::{renderer, validator};

use crate::fetch::{FetchRequest, HttpFetch};

const HTTP_OK: u16 = 200;

/// Result of a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Rendered status message.
    Notification(String),
    /// The rendered message matched the last delivered one. Reported by the
    /// supervisor after dedup; a bare cycle never yields it.
    NoChange,
    Failure(CheckError),
}

/// Fetches the homework status endpoint and turns the answer into a message.
pub struct PollCycle<F> {
    fetcher: F,
    endpoint: String,
    token: String,
}

impl<F: HttpFetch> PollCycle<F> {
    pub fn new(fetcher: F, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Run the cycle for submissions updated since the `since` unix timestamp.
    pub async fn run_once(&self, since: i64) -> CycleOutcome {
        match self.check(since).await {
            Ok(text) => CycleOutcome::Notification(text),
            Err(err) => CycleOutcome::Failure(err),
        }
    }

    async fn check(&self, since: i64) -> Result<String, CheckError> {
        let request = self.request(since);
        let response = self
            .fetcher
            .get(&request)
            .await
            .map_err(|e| CheckError::EndpointUnreachable(e.to_string()))?;

        if response.status != HTTP_OK {
            return Err(CheckError::UnexpectedStatusCode {
                url: response.url,
                code: response.status,
            });
        }

        let body: Value = serde_json::from_slice(&response.body)
            .map_err(|e| CheckError::MalformedResponse(e.to_string()))?;
        let homework = validator::validate(&body)?;
        renderer::render(&homework)
    }

    fn request(&self, since: i64) -> FetchRequest {
        FetchRequest {
            url: self.endpoint.clone(),
            headers: vec![(
                "Authorization".to_string(),
                format!("OAuth {}", self.token),
            )],
            query: vec![("from_date".to_string(), since.to_string())],
        }
    }
}
