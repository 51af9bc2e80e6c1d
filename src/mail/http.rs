//! HTTP mail API transport.
//!
//! Posts each message as JSON to a configured endpoint (any transactional
//! mail service with a `POST /emails`-style API). Authentication is an
//! optional bearer token.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{DeliveryReceipt, EmailMessage, MailError, Mailer};

/// Mail transport backed by an HTTP JSON API.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    api_url: String,
    api_key: Option<String>,
    client: Client,
}

/// Accepted-message body returned by the mail API.
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

impl HttpMailer {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError> {
        let mut req = self.client.post(&self.api_url).json(&serde_json::json!({
            "from": {
                "name": message.from_name,
                "address": message.from_address,
            },
            "to": message.to,
            "subject": message.subject,
            "html": message.html_body,
        }));
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let accepted: SendResponse = response.json().await?;
        Ok(DeliveryReceipt {
            message_id: accepted.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn message() -> EmailMessage {
        EmailMessage {
            from_name: "Planner Team".to_string(),
            from_address: "hello@planner.app".to_string(),
            to: "a@b.com".to_string(),
            subject: "Confirm your trip".to_string(),
            html_body: "<p>hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_message_and_returns_receipt() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/emails")
                    .header("authorization", "Bearer key-123")
                    .json_body_partial(r#"{"to": "a@b.com", "subject": "Confirm your trip"}"#);
                then.status(200)
                    .json_body(serde_json::json!({ "id": "msg-1" }));
            })
            .await;

        let mailer = HttpMailer::new(server.url("/emails"), Some("key-123".to_string()));
        let receipt = mailer.send(&message()).await.expect("send failed");

        mock.assert_async().await;
        assert_eq!(receipt.message_id, "msg-1");
    }

    #[tokio::test]
    async fn maps_rejection_to_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(422).body("bad recipient");
            })
            .await;

        let mailer = HttpMailer::new(server.url("/emails"), None);
        let err = mailer.send(&message()).await.expect_err("should fail");

        match err {
            MailError::Rejected { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "bad recipient");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
