use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{MessageSender, MessagingError, OutboundMessage};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Message resource returned by the Messages endpoint.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResource {
    message: String,
}

/// HTTP client for the Twilio Messages API (SMS and WhatsApp).
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioClient {
    pub fn new(base_url: String, account_sid: String, auth_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        TwilioClient {
            client,
            base_url,
            account_sid,
            auth_token,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

#[async_trait]
impl MessageSender for TwilioClient {
    async fn send(&self, message: &OutboundMessage) -> Result<String, MessagingError> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", message.to.as_str()),
                ("From", message.from.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResource>(&body)
                .map(|err| err.message)
                .unwrap_or(body);
            return Err(MessagingError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created = response
            .json::<MessageResource>()
            .await
            .map_err(|e| MessagingError::InvalidResponse(e.to_string()))?;

        Ok(created.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_messages_url() {
        let client = TwilioClient::new(
            "https://api.twilio.com/".to_string(),
            "AC123".to_string(),
            "token".to_string(),
        );
        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[tokio::test]
    async fn sends_form_encoded_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .match_header(
                "authorization",
                mockito::Matcher::Regex("^Basic ".to_string()),
            )
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("To".to_string(), "+628123456789".to_string()),
                mockito::Matcher::UrlEncoded("From".to_string(), "+15005550006".to_string()),
                mockito::Matcher::UrlEncoded("Body".to_string(), "hello".to_string()),
            ]))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sid": "SM42", "status": "queued"}"#)
            .create_async()
            .await;

        let client = TwilioClient::new(server.url(), "AC123".to_string(), "token".to_string());
        let sid = client
            .send(&OutboundMessage {
                to: "+628123456789".to_string(),
                from: "+15005550006".to_string(),
                body: "hello".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(sid, "SM42");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn maps_provider_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code": 21211, "message": "The 'To' number is not a valid phone number.", "status": 400}"#)
            .create_async()
            .await;

        let client = TwilioClient::new(server.url(), "AC123".to_string(), "token".to_string());
        let result = client
            .send(&OutboundMessage {
                to: "+0".to_string(),
                from: "+15005550006".to_string(),
                body: "hello".to_string(),
            })
            .await;

        match result {
            Err(MessagingError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("not a valid phone number"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
