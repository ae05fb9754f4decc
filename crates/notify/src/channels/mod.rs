//! Notification channel implementations.

pub mod telegram;

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::message::Message;

/// Trait for chat channels a message can be delivered to.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Check if this channel is enabled/configured.
    fn enabled(&self) -> bool;

    /// Send a message to the chat identified by `chat_id`.
    async fn send(&self, chat_id: &str, message: &Message) -> Result<(), ChannelError>;
}
