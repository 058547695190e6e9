//! In-memory stand-ins for the HTTP and messaging seams.
//!
//! Both types are cheap to clone and share their state, so a test can hand
//! one clone to the code under test and inspect the other.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hw_notifier::{DeliveryError, MessageSink};
use tokio::time::Instant;

use crate::fetch::{FetchRequest, FetchResponse, HttpFetch, TransportError};

type Scripted = Result<FetchResponse, TransportError>;

#[derive(Default)]
struct FetcherInner {
    queue: VecDeque<Scripted>,
    last: Option<Scripted>,
    requests: Vec<(Instant, FetchRequest)>,
}

/// Replays a fixed list of responses; once the list runs out the last one repeats.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    inner: Arc<Mutex<FetcherInner>>,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FetcherInner {
                queue: script.into(),
                ..Default::default()
            })),
        }
    }

    pub fn always(response: FetchResponse) -> Self {
        Self::new(vec![Ok(response)])
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.lock()
            .requests
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// When each request arrived, on the tokio clock.
    pub fn request_times(&self) -> Vec<Instant> {
        self.lock().requests.iter().map(|(at, _)| *at).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FetcherInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl HttpFetch for ScriptedFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, TransportError> {
        let mut inner = self.lock();
        inner.requests.push((Instant::now(), request.clone()));
        if let Some(next) = inner.queue.pop_front() {
            inner.last = Some(next);
        }
        inner.last.clone().unwrap_or_else(|| {
            Err(TransportError("scripted fetcher has no responses".to_string()))
        })
    }
}

impl FetchResponse {
    /// Response with a JSON body, as the homework API would send it.
    pub fn json(status: u16, url: &str, body: &serde_json::Value) -> Self {
        Self {
            status,
            url: url.to_string(),
            body: body.to_string().into_bytes(),
        }
    }
}

#[derive(Default)]
struct SinkInner {
    delivered: Vec<(String, String)>,
    attempts: usize,
    failures_left: usize,
}

/// Records delivered messages; can be told to fail the next N attempts.
#[derive(Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<SinkInner>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, attempts: usize) {
        self.lock().failures_left = attempts;
    }

    /// `(chat_id, text)` pairs that were accepted.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.lock().delivered.clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.lock()
            .delivered
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SinkInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let mut inner = self.lock();
        inner.attempts += 1;
        if inner.failures_left > 0 {
            inner.failures_left -= 1;
            return Err(DeliveryError::Rejected {
                status: 502,
                description: "simulated outage".to_string(),
            });
        }
        inner.delivered.push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}
