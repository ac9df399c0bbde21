//! Best-effort customer notifications.
//!
//! [`NotificationDispatcher::dispatch`] never fails: a missing provider or a
//! provider error becomes a [`NotificationOutcome`] and an error log entry, so
//! the booking operation that triggered it is unaffected.

pub mod template;
pub mod twilio;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::domain::{BookingTransaction, OfficeSpace};

pub use template::{Channel, MessageTemplate};
pub use twilio::TwilioClient;

#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

/// A fully addressed message, ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub from: String,
    pub body: String,
}

/// Outbound messaging provider. Returns the provider's message id.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<String, MessagingError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationOutcome {
    Sent { message_id: String },
    Skipped { reason: String },
    Failed { error: String },
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent { .. })
    }
}

/// Sender addresses registered with the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIds {
    pub sms_from: String,
    pub whatsapp_from: Option<String>,
}

#[derive(Clone)]
struct Provider {
    sender: Arc<dyn MessageSender>,
    ids: SenderIds,
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    provider: Option<Provider>,
    support_contact: Option<String>,
}

impl NotificationDispatcher {
    pub fn new(
        sender: Arc<dyn MessageSender>,
        ids: SenderIds,
        support_contact: Option<String>,
    ) -> Self {
        Self {
            provider: Some(Provider { sender, ids }),
            support_contact,
        }
    }

    /// A dispatcher that skips every message.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            support_contact: None,
        }
    }

    /// Wires the Twilio client from validated configuration.
    pub fn from_config(config: &Config) -> Self {
        match &config.messaging {
            Some(messaging) => {
                let client = TwilioClient::new(
                    messaging.api_base_url.clone(),
                    messaging.account_sid.clone(),
                    messaging.auth_token.clone(),
                );
                Self::new(
                    Arc::new(client),
                    SenderIds {
                        sms_from: messaging.sms_from.clone(),
                        whatsapp_from: messaging.whatsapp_from.clone(),
                    },
                    config.support_contact.clone(),
                )
            }
            None => Self {
                provider: None,
                support_contact: config.support_contact.clone(),
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn dispatch(
        &self,
        template: MessageTemplate,
        booking: &BookingTransaction,
        office: &OfficeSpace,
    ) -> NotificationOutcome {
        let Some(provider) = &self.provider else {
            tracing::error!(
                booking_trx_id = %booking.booking_trx_id,
                template = ?template,
                "Twilio credentials are not configured; notification skipped"
            );
            return NotificationOutcome::Skipped {
                reason: "messaging provider is not configured".to_string(),
            };
        };

        let body = template.render(booking, office, self.support_contact.as_deref());
        let (channel, from) = match (template.channel(), &provider.ids.whatsapp_from) {
            (Channel::WhatsApp, Some(whatsapp_from)) => (Channel::WhatsApp, whatsapp_from.as_str()),
            _ => (Channel::Sms, provider.ids.sms_from.as_str()),
        };
        // SMS senders may be alphanumeric IDs or messaging-service SIDs.
        let from = match channel {
            Channel::WhatsApp => channel.address(from),
            Channel::Sms => from.to_string(),
        };
        let message = OutboundMessage {
            to: channel.address(&booking.phone_number),
            from,
            body,
        };

        match provider.sender.send(&message).await {
            Ok(message_id) => {
                tracing::info!(
                    booking_trx_id = %booking.booking_trx_id,
                    channel = ?channel,
                    message_id = %message_id,
                    "Notification sent"
                );
                NotificationOutcome::Sent { message_id }
            }
            Err(e) => {
                tracing::error!(
                    booking_trx_id = %booking.booking_trx_id,
                    channel = ?channel,
                    error = %e,
                    "Notification sending failed"
                );
                NotificationOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
