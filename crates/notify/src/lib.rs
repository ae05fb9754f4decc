//! Chat notifications for relayed form submissions.
//!
//! This crate formats a summary of a written submission and delivers it to
//! a chat, degrading to a minimal message when the rich one is rejected.
//! Delivery never fails the caller: errors are logged and reported through
//! [`Delivery`].
//!
//! # Usage
//!
//! ```no_run
//! use notify::{Notifier, SubmissionSummary};
//!
//! # async fn run() {
//! // Create notifier from environment variables
//! let notifier = Notifier::from_env();
//!
//! let summary = SubmissionSummary::new("https://docs.google.com/spreadsheets/d/abc/edit#gid=0")
//!     .with_field("Имя", "Анна");
//! notifier.deliver("-1001234567890", &summary).await;
//! # }
//! ```
//!
//! # Configuration
//!
//! - `TELEGRAM_BOT_TOKEN`: bot token (enables the Telegram channel)
//! - `NOTIFY_DISABLED`: Set to "true" to disable all notifications

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;
pub mod message;

pub use channels::telegram::TelegramChannel;
pub use channels::NotifyChannel;
pub use error::ChannelError;
pub use message::{Message, SubmissionSummary, TextFormat};

use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Environment variable to disable all notifications.
const ENV_NOTIFY_DISABLED: &str = "NOTIFY_DISABLED";

/// Outcome of delivering one summary to one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The full summary was accepted.
    Sent,
    /// The summary was rejected and the fallback message went out instead.
    Fallback,
    /// Neither message could be delivered.
    Failed,
}

/// Dispatches submission summaries to the configured chat channels.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
    disabled: bool,
}

impl Notifier {
    /// Create a new notifier from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let disabled = std::env::var(ENV_NOTIFY_DISABLED)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        if disabled {
            info!("Notifications disabled via NOTIFY_DISABLED");
            return Self::disabled();
        }

        let mut channels: Vec<Arc<dyn NotifyChannel>> = vec![];

        let telegram = TelegramChannel::from_env();
        if telegram.enabled() {
            info!("Telegram notifications enabled");
            channels.push(Arc::new(telegram));
        }

        if channels.is_empty() {
            warn!("No notification channels configured");
        }

        Self {
            channels,
            disabled: false,
        }
    }

    /// Create a notifier with specific channels.
    #[must_use]
    pub fn with_channels(channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self {
            channels,
            disabled: false,
        }
    }

    /// Create a disabled notifier (for testing or when notifications are off).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            channels: vec![],
            disabled: true,
        }
    }

    /// Check if any notification channels are enabled.
    #[must_use]
    pub fn has_channels(&self) -> bool {
        !self.disabled && self.channels.iter().any(|c| c.enabled())
    }

    /// Deliver `summary` to `chat_id` on every enabled channel, one after another.
    ///
    /// A rejected summary is retried once as the plain fallback message.
    /// Nothing is propagated; the per-channel outcomes are returned.
    pub async fn deliver(
        &self,
        chat_id: &str,
        summary: &SubmissionSummary,
    ) -> Vec<(&'static str, Delivery)> {
        if !self.has_channels() {
            debug!("No channels configured, skipping notification");
            return vec![];
        }

        let mut results = vec![];

        for channel in self.channels.iter().filter(|c| c.enabled()) {
            let channel_name = channel.name();
            let outcome = Self::deliver_one(channel.as_ref(), chat_id, summary).await;
            results.push((channel_name, outcome));
        }

        results
    }

    async fn deliver_one(
        channel: &dyn NotifyChannel,
        chat_id: &str,
        summary: &SubmissionSummary,
    ) -> Delivery {
        let channel_name = channel.name();

        match channel.send(chat_id, &summary.to_message()).await {
            Ok(()) => {
                debug!(channel = channel_name, "Notification sent");
                return Delivery::Sent;
            }
            Err(e) => {
                warn!(
                    channel = channel_name,
                    error = %e,
                    "Failed to send summary, falling back to minimal message"
                );
            }
        }

        match channel.send(chat_id, &summary.fallback()).await {
            Ok(()) => Delivery::Fallback,
            Err(e) => {
                error!(
                    channel = channel_name,
                    error = %e,
                    "Failed to send fallback notification"
                );
                Delivery::Failed
            }
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::from_env()
    }
}
