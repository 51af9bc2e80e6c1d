//! In-memory mail transport for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{DeliveryReceipt, EmailMessage, MailError, Mailer};

/// Captures messages instead of sending them.
///
/// Clones share the same captured list, so a test can keep one handle and
/// hand another to the service under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    reject: bool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that rejects every message, for dispatch-failure paths.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reject: true,
        }
    }

    /// Snapshot of everything sent so far, in dispatch order.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError> {
        if self.reject {
            return Err(MailError::Rejected {
                status: 500,
                body: "rejected by test mailer".to_string(),
            });
        }

        let mut sent = self.sent.lock().expect("mailer lock poisoned");
        sent.push(message.clone());
        Ok(DeliveryReceipt {
            message_id: format!("mem-{}", sent.len()),
        })
    }
}
