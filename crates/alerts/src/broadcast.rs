//! Sequential alert delivery to subscribers.

use crate::telegram::TelegramBot;
use async_trait::async_trait;
use tracing::{error, info};

/// Delivery seam for broadcast, implemented by the Telegram bot.
#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn deliver(
        &self,
        chat_id: i64,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

#[async_trait]
impl AlertSender for TelegramBot {
    async fn deliver(
        &self,
        chat_id: i64,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.send_alert(chat_id, message).await?;
        Ok(())
    }
}

/// Deliver a message to every recipient, sequentially.
///
/// Per-recipient failures are logged and do not abort delivery to the
/// rest, and never unsubscribe the recipient. Returns the number of
/// successful deliveries.
pub async fn broadcast(sender: &dyn AlertSender, recipients: &[i64], message: &str) -> u32 {
    let mut sent = 0u32;

    for &chat_id in recipients {
        match sender.deliver(chat_id, message).await {
            Ok(()) => {
                sent += 1;
            }
            Err(e) => {
                error!(chat_id, error = %e, "Failed to deliver alert");
            }
        }
    }

    info!(sent, total = recipients.len(), "Broadcast complete");
    sent
}
