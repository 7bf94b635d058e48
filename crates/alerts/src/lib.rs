//! Telegram alert layer for the coinwatch bot.
//!
//! This crate provides:
//! - Flat-file subscriber storage
//! - Telegram bot integration and command handlers
//! - Alert message composition and broadcast delivery

pub mod broadcast;
pub mod composer;
pub mod store;
pub mod telegram;

pub use broadcast::AlertSender;
pub use store::SubscriberStore;
pub use telegram::TelegramBot;
