use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::error::Error;
use crate::status::Status;

/// Upper bound for a single webhook dispatch.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Alert about one detected transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub target: String,
    pub status: Status,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(target: impl Into<String>, status: Status) -> Self {
        Self {
            target: target.into(),
            status,
            timestamp: Utc::now(),
        }
    }

    pub fn is_down(&self) -> bool {
        !self.status.is_up()
    }

    /// Human-readable alert text.
    pub fn message(&self) -> String {
        format!(
            "Site Status Alert\nSite: {}\nStatus: {}\nTime: {}",
            self.target,
            self.status.alert_label(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// Delivers notifications to the outside world.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    async fn notify(&self, notification: &Notification) -> Result<(), Error>;
}

#[derive(Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// Posts `{"text": ...}` payloads to a chat-ops style incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, Error> {
        let client = Client::builder().timeout(NOTIFY_TIMEOUT).build()?;
        Ok(Self::with_client(client, webhook_url))
    }

    pub fn with_client(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), Error> {
        let message = notification.message();
        let payload = WebhookMessage { text: &message };

        self.client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        info!("Sent notification for {}", notification.target);
        Ok(())
    }
}
