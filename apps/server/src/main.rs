//! Coinwatch Bot - Telegram crypto alert service
//!
//! Polls CoinGecko and followin.io and relays hourly alerts plus
//! on-demand queries to subscribed Telegram chats.

mod config;
mod health;
mod scheduler;
mod state;

use clap::Parser;
use coinwatch_alerts::{SubscriberStore, TelegramBot};
use coinwatch_feeds::{CoinGeckoClient, NewsFetcher};
use state::create_state;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Coinwatch Bot CLI
#[derive(Parser, Debug)]
#[command(name = "coinwatch-bot")]
#[command(about = "Telegram crypto price and news alert bot", long_about = None)]
struct Args {
    /// Subscriber file path
    #[arg(short, long, default_value = "subscribers.json")]
    subscribers: PathBuf,

    /// Seconds between scheduled broadcasts
    #[arg(short, long, default_value_t = 3600)]
    interval: u64,

    /// Liveness endpoint port
    #[arg(long, default_value_t = 8080)]
    health_port: u16,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    info!("🚀 Coinwatch Bot starting...");
    info!("  Subscribers: {}", args.subscribers.display());
    info!("  Broadcast interval: {}s", args.interval);
    info!("  Liveness port: {}", args.health_port);

    let token = match config::bot_token_from_env() {
        Ok(token) => token,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let store = match SubscriberStore::load(&args.subscribers) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load subscribers: {}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} subscriber(s)", store.len());

    let bot = Arc::new(TelegramBot::new(
        &token,
        Arc::new(store),
        CoinGeckoClient::new(),
        NewsFetcher::new(),
    ));

    let state = create_state();
    state.start();

    // Liveness endpoint for uptime monitors
    let health_port = args.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_port).await {
            error!("Liveness endpoint failed: {}", e);
        }
    });

    // Hourly broadcast scheduler
    let scheduler_state = state.clone();
    let scheduler_bot = bot.clone();
    let interval = args.interval;
    let scheduler_handle = tokio::spawn(async move {
        scheduler::run_broadcast_loop(scheduler_state, scheduler_bot, interval).await;
    });

    // Command dispatcher runs until Ctrl+C
    bot.run().await;

    warn!("Shutdown signal received");
    state.stop();

    let _ = tokio::time::timeout(Duration::from_secs(2), scheduler_handle).await;

    info!("👋 Coinwatch Bot stopped");
}
