//! CoinGecko market data client.
//!
//! Fetches spot prices and a bulk market snapshot ranked by market cap,
//! then ranks assets by percent change over a requested window.

use crate::error::FeedError;
use coinwatch_core::{ChangeWindow, Direction, MarketMover};
use serde::Deserialize;
use std::cmp::Ordering;
use std::time::Duration;
use tracing::debug;

/// CoinGecko asset id for Bitcoin.
pub const BITCOIN: &str = "bitcoin";

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Assets per market snapshot (one page, ranked by market cap).
const SNAPSHOT_SIZE: u32 = 100;

/// One entry of the `/coins/markets` bulk snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinMarket {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "price_change_percentage_1h_in_currency")]
    pub change_1h: Option<f64>,
    #[serde(rename = "price_change_percentage_2h_in_currency")]
    pub change_2h: Option<f64>,
    #[serde(rename = "price_change_percentage_24h_in_currency")]
    pub change_24h: Option<f64>,
}

impl CoinMarket {
    /// Percent change for the given window, if the API reported one.
    pub fn change(&self, window: ChangeWindow) -> Option<f64> {
        match window {
            ChangeWindow::H1 => self.change_1h,
            ChangeWindow::H2 => self.change_2h,
            ChangeWindow::H24 => self.change_24h,
        }
    }
}

/// CoinGecko REST client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Fetch the current USD price for an asset id.
    ///
    /// Returns None on any transport, status, or parse failure; callers
    /// treat absence as "price unavailable".
    pub async fn simple_price(&self, id: &str) -> Option<f64> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd",
            self.base_url, id
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("CoinGecko: price request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("CoinGecko: price HTTP {}", response.status());
            return None;
        }

        let json: serde_json::Value = match response.json().await {
            Ok(j) => j,
            Err(e) => {
                debug!("CoinGecko: failed to parse price response: {}", e);
                return None;
            }
        };

        // Response: {"bitcoin":{"usd":65000.5}}
        json[id]["usd"].as_f64()
    }

    /// Fetch the bulk market snapshot with 1h/2h/24h percent-change fields.
    pub async fn fetch_markets(&self) -> Result<Vec<CoinMarket>, FeedError> {
        let url = format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&price_change_percentage=1h,2h,24h",
            self.base_url, SNAPSHOT_SIZE
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let markets: Vec<CoinMarket> = response.json().await?;

        debug!("CoinGecko: fetched {} market entries", markets.len());
        Ok(markets)
    }

    /// Fetch the snapshot and rank movers for one window.
    pub async fn ranked_movers(
        &self,
        window: ChangeWindow,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<MarketMover>, FeedError> {
        let snapshot = self.fetch_markets().await?;
        Ok(rank_movers(&snapshot, window, direction, limit))
    }
}

/// Rank a market snapshot by percent change over a window.
///
/// Entries missing the window's field are dropped. The sort is stable, so
/// the snapshot's market-cap order is preserved among equal changes.
pub fn rank_movers(
    snapshot: &[CoinMarket],
    window: ChangeWindow,
    direction: Direction,
    limit: usize,
) -> Vec<MarketMover> {
    let mut ranked: Vec<(&CoinMarket, f64)> = snapshot
        .iter()
        .filter_map(|coin| coin.change(window).map(|change| (coin, change)))
        .collect();

    match direction {
        Direction::Gainers => {
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
        }
        Direction::Losers => {
            ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        }
    }
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(coin, change)| MarketMover::new(coin.name.clone(), &coin.symbol, change, window))
        .collect()
}
