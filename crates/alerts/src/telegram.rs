//! Telegram bot commands and handlers.

use crate::composer;
use crate::store::SubscriberStore;
use coinwatch_core::{ChangeWindow, Direction};
use coinwatch_feeds::{CoinGeckoClient, NewsFetcher};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use thiserror::Error;
use tracing::info;

/// Movers listed per window section.
const MOVERS_LIMIT: usize = 5;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
}

/// Bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Subscribe to hourly price and news alerts")]
    Start,
    #[command(description = "Unsubscribe from alerts")]
    Stop,
    #[command(description = "Top gainers over 1h, 2h and 24h")]
    Checklong,
    #[command(description = "Top losers over 1h, 2h and 24h")]
    Checkshort,
    #[command(description = "Latest crypto news headlines")]
    Checknews,
    #[command(description = "Show help")]
    Help,
}

/// Telegram bot wrapper.
pub struct TelegramBot {
    bot: Bot,
    store: Arc<SubscriberStore>,
    market: CoinGeckoClient,
    news: NewsFetcher,
}

impl TelegramBot {
    /// Create a new bot with the given token.
    pub fn new(
        token: &str,
        store: Arc<SubscriberStore>,
        market: CoinGeckoClient,
        news: NewsFetcher,
    ) -> Self {
        let bot = Bot::new(token);
        Self {
            bot,
            store,
            market,
            news,
        }
    }

    /// Get the subscriber store.
    pub fn store(&self) -> &SubscriberStore {
        &self.store
    }

    /// Get the market data client.
    pub fn market(&self) -> &CoinGeckoClient {
        &self.market
    }

    /// Get the news fetcher.
    pub fn news(&self) -> &NewsFetcher {
        &self.news
    }

    /// Send an alert message to a chat.
    pub async fn send_alert(&self, chat_id: i64, message: &str) -> Result<(), TelegramError> {
        self.bot.send_message(ChatId(chat_id), message).await?;
        Ok(())
    }

    /// Run the bot command handler until shutdown.
    pub async fn run(self: Arc<Self>) {
        let bot = self.bot.clone();
        let handler = Update::filter_message().filter_command::<Command>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let this = Arc::clone(&self);
                async move { this.handle_command(bot, msg, cmd).await }
            },
        );

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    async fn handle_command(
        &self,
        bot: Bot,
        msg: Message,
        cmd: Command,
    ) -> Result<(), TelegramError> {
        let chat_id = msg.chat.id.0;

        match cmd {
            Command::Start => {
                if self.store.add(chat_id) {
                    info!(chat_id, "Chat subscribed");
                }
                bot.send_message(
                    msg.chat.id,
                    "You are subscribed to hourly Bitcoin price and crypto news alerts.",
                )
                .await?;
            }

            Command::Stop => {
                if self.store.remove(chat_id) {
                    info!(chat_id, "Chat unsubscribed");
                }
                bot.send_message(msg.chat.id, "You have unsubscribed from alerts.")
                    .await?;
            }

            Command::Checklong => {
                let report = self.movers_report(Direction::Gainers).await;
                bot.send_message(msg.chat.id, report).await?;
            }

            Command::Checkshort => {
                let report = self.movers_report(Direction::Losers).await;
                bot.send_message(msg.chat.id, report).await?;
            }

            Command::Checknews => {
                let news = self.news.headlines().await;
                bot.send_message(msg.chat.id, news).await?;
            }

            Command::Help => {
                bot.send_message(msg.chat.id, Command::descriptions().to_string())
                    .await?;
            }
        }

        Ok(())
    }

    /// Build the three-window movers report.
    ///
    /// A failed window fetch is reported as a short error string in place
    /// of that section, so the reply is always a string.
    async fn movers_report(&self, direction: Direction) -> String {
        let mut sections = Vec::new();

        for window in ChangeWindow::ALL {
            let section = match self
                .market
                .ranked_movers(window, direction, MOVERS_LIMIT)
                .await
            {
                Ok(movers) => composer::movers_section(window, direction, MOVERS_LIMIT, &movers),
                Err(e) => format!("Failed to fetch market data: {}", e),
            };
            sections.push(section);
        }

        sections.join("\n\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert!(matches!(
            Command::parse("/start", "coinwatch_bot"),
            Ok(Command::Start)
        ));
        assert!(matches!(
            Command::parse("/checklong", "coinwatch_bot"),
            Ok(Command::Checklong)
        ));
        assert!(matches!(
            Command::parse("/checknews", "coinwatch_bot"),
            Ok(Command::Checknews)
        ));
        assert!(Command::parse("/unknown", "coinwatch_bot").is_err());
    }
}
