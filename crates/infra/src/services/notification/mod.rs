mod inmemory;
mod smtp;
mod templates;

pub use inmemory::InMemoryMailer;
pub use smtp::SmtpMailer;

use pulsebridge_domain::{Event, User};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// How an `OutgoingMail` was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed over to the mail transport
    Sent,
    /// No mail transport is configured, the mail was written to the log instead
    Logged,
    /// The recipient has no email address
    Skipped,
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),
    #[error("Unable to build mail: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("Mail transport failure: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("Mail transport unavailable: {0}")]
    Unavailable(String),
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<Delivery, DeliveryError>;
}

/// Renders and delivers the notifications sent to volunteers
#[derive(Clone)]
pub struct NotificationSender {
    mailer: Arc<dyn IMailer>,
}

impl NotificationSender {
    pub fn new(mailer: Arc<dyn IMailer>) -> Self {
        Self { mailer }
    }

    pub async fn send_subscription_confirmation(
        &self,
        user: &User,
        event: &Event,
        reminder_hours: i64,
    ) -> Result<Delivery, DeliveryError> {
        let mail = templates::subscription_confirmation(user, event, reminder_hours);
        self.deliver(mail).await
    }

    pub async fn send_event_reminder(
        &self,
        user: &User,
        event: &Event,
        reminder_hours: i64,
    ) -> Result<Delivery, DeliveryError> {
        let mail = templates::event_reminder(user, event, reminder_hours);
        self.deliver(mail).await
    }

    async fn deliver(&self, mail: OutgoingMail) -> Result<Delivery, DeliveryError> {
        if mail.to.trim().is_empty() {
            info!("Skipping mail: {} without a recipient", mail.subject);
            return Ok(Delivery::Skipped);
        }
        self.mailer.send_mail(mail).await
    }
}
