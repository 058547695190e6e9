//! Telegram Bot API delivery via `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{DeliveryError, MessageSink};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages through a Telegram bot.
#[derive(Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl TelegramNotifier {
    /// `api_url` is the Bot API base, e.g. `https://api.telegram.org`.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

#[async_trait]
impl MessageSink for TelegramNotifier {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(self.send_message_url())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            // The request URL carries the bot token.
            .map_err(|e| e.without_url())?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.without_url())?;
        let parsed: Option<BotApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => {
                tracing::info!(chat_id, chars = text.chars().count(), "Message delivered");
                Ok(())
            }
            Some(BotApiResponse { description, .. }) => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: body,
            }),
        }
    }
}
