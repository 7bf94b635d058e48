//! Periodic alert broadcast scheduler.

use crate::state::SharedState;
use coinwatch_alerts::broadcast::broadcast;
use coinwatch_alerts::{composer, TelegramBot};
use coinwatch_feeds::market::BITCOIN;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Run the periodic alert broadcast until the state stops.
///
/// Waits one full interval, measured from loop start, before the first
/// broadcast. The wait is sliced so a stop is picked up within a second.
pub async fn run_broadcast_loop(state: SharedState, bot: Arc<TelegramBot>, interval_secs: u64) {
    info!(interval_secs, "Starting broadcast scheduler");

    loop {
        for _ in 0..interval_secs {
            if !state.is_running() {
                info!("Broadcast scheduler stopped");
                return;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        let price = bot.market().simple_price(BITCOIN).await;
        let headlines = bot.news().headlines().await;
        let message = composer::price_alert_message(price, &headlines);

        let recipients = bot.store().snapshot();
        let sent = broadcast(bot.as_ref(), &recipients, &message).await;
        info!(
            sent,
            subscribers = recipients.len(),
            "Scheduled alert cycle complete"
        );
    }
}
