//! Notification delivery.
//!
//! The poller only knows the [`MessageSink`] trait; [`telegram::TelegramNotifier`]
//! is the production implementation.

pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

/// Failure to hand a message to the messaging service.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("message rejected (HTTP {status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Something that can deliver a text message to a chat.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}
