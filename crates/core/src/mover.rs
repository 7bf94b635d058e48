//! Ranked market mover records.

use crate::ChangeWindow;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// An asset ranked by percent price change within a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMover {
    /// Display name (e.g., "Bitcoin")
    pub name: String,
    /// Ticker symbol as reported by the API (e.g., "btc")
    pub symbol: CompactString,
    /// Percent change over the window (12.34 means +12.34%)
    pub percent_change: f64,
    /// Window the change was measured over
    pub window: ChangeWindow,
}

impl MarketMover {
    pub fn new(
        name: impl Into<String>,
        symbol: &str,
        percent_change: f64,
        window: ChangeWindow,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: CompactString::new(symbol),
            percent_change,
            window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mover_new() {
        let mover = MarketMover::new("Bitcoin", "btc", -3.5, ChangeWindow::H24);
        assert_eq!(mover.name, "Bitcoin");
        assert_eq!(mover.symbol.as_str(), "btc");
        assert_eq!(mover.window, ChangeWindow::H24);
    }
}
