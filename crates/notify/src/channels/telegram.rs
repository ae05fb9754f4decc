//! Telegram Bot API notification channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChannelError;
use crate::message::{Message, TextFormat};
use crate::NotifyChannel;

/// Environment variable for the bot token.
const ENV_TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";

/// Bot API endpoint.
const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Telegram bot channel.
pub struct TelegramChannel {
    bot_token: Option<String>,
    api_url: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    /// Create a new Telegram channel from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let bot_token = std::env::var(ENV_TELEGRAM_BOT_TOKEN)
            .ok()
            .filter(|s| !s.is_empty());

        if bot_token.is_some() {
            debug!("Telegram notifications enabled");
        } else {
            debug!("Telegram notifications disabled (TELEGRAM_BOT_TOKEN not set)");
        }

        Self {
            bot_token,
            api_url: TELEGRAM_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a Telegram channel with a specific bot token.
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: Some(bot_token.into()),
            api_url: TELEGRAM_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the channel at a different Bot API root (mock servers, local Bot API).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn format_payload<'a>(chat_id: &'a str, message: &'a Message) -> SendMessage<'a> {
        SendMessage {
            chat_id,
            text: &message.text,
            parse_mode: match message.format {
                TextFormat::Markdown => Some("Markdown"),
                TextFormat::Plain => None,
            },
            disable_web_page_preview: true,
        }
    }
}

#[async_trait]
impl NotifyChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn enabled(&self) -> bool {
        self.bot_token.is_some()
    }

    async fn send(&self, chat_id: &str, message: &Message) -> Result<(), ChannelError> {
        let bot_token = self
            .bot_token
            .as_ref()
            .ok_or_else(|| ChannelError::NotConfigured(ENV_TELEGRAM_BOT_TOKEN.to_string()))?;

        let url = format!(
            "{}/bot{bot_token}/sendMessage",
            self.api_url.trim_end_matches('/')
        );
        let payload = Self::format_payload(chat_id, message);

        debug!(channel = "telegram", chat_id = %chat_id, "Sending notification");

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let reply: Option<ApiReply> = serde_json::from_str(&body).ok();

        if status.is_success() && reply.as_ref().is_some_and(|r| r.ok) {
            debug!(channel = "telegram", "Notification sent successfully");
            return Ok(());
        }

        warn!(
            channel = "telegram",
            status = %status,
            body = %body,
            "Telegram sendMessage request failed"
        );

        if let Some(retry_after_secs) = reply
            .as_ref()
            .and_then(|r| r.parameters.as_ref())
            .and_then(|p| p.retry_after)
        {
            return Err(ChannelError::RateLimited { retry_after_secs });
        }

        Err(ChannelError::Api {
            status: status.as_u16(),
            description: reply
                .and_then(|r| r.description)
                .unwrap_or(body),
        })
    }
}

// =============================================================================
// Telegram API types
// =============================================================================

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    description: Option<String>,
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}
