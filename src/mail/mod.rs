//! Outbound email dispatch.
//!
//! The workflows talk to the [`Mailer`] trait so the transport can be
//! swapped out: [`HttpMailer`] posts to an HTTP mail API in production,
//! [`LogMailer`] only logs when no API is configured, and [`MemoryMailer`]
//! captures messages for tests.

mod http;
mod memory;

pub use http::HttpMailer;
pub use memory::MemoryMailer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Sender identity, recipient and content for one outbound email.
///
/// Built per dispatch and discarded afterwards; only the transport's
/// [`DeliveryReceipt`] is kept around long enough to be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Identifier a transport hands back once it accepts a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

/// Mail transport errors.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail API rejected the message: {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A transport that can deliver one [`EmailMessage`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError>;
}

/// Transport used when no mail API is configured: logs the message and
/// fabricates a receipt. Local development only.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "no mail API configured, logging message instead of sending"
        );
        tracing::debug!(body = %message.html_body, "message body");
        Ok(DeliveryReceipt {
            message_id: format!("log-{}", Uuid::new_v4()),
        })
    }
}
