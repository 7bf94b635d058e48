//! Alert message composition.

use coinwatch_core::{ChangeWindow, Direction, MarketMover};

/// Price line used when the quote could not be fetched.
pub const PRICE_UNAVAILABLE: &str = "Could not fetch the current Bitcoin price.";

/// Compose the scheduled alert: price line, news section, timestamp.
pub fn price_alert_message(price: Option<f64>, headlines: &str) -> String {
    let price_line = match price {
        Some(price) => format!("Current Bitcoin price: ${}", price),
        None => PRICE_UNAVAILABLE.to_string(),
    };

    let now = chrono::Utc::now();
    format!(
        "⚡ {}\n\n📰 Latest news from followin.io:\n\n{}\n\n⏰ {}",
        price_line,
        headlines,
        now.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Compose one ranked-movers section for a window.
///
/// The header names the requested count and window; each line is
/// `Name (SYMBOL): +X.XX%` with an explicit sign.
pub fn movers_section(
    window: ChangeWindow,
    direction: Direction,
    limit: usize,
    movers: &[MarketMover],
) -> String {
    let mut lines = vec![format!(
        "Top {} {} in the last {}:",
        limit,
        direction.label(),
        window.label()
    )];

    for mover in movers {
        lines.push(format!(
            "{} ({}): {:+.2}%",
            mover.name,
            mover.symbol.to_uppercase(),
            mover.percent_change
        ));
    }

    lines.join("\n")
}
