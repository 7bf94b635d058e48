//! News page headline fetcher.
//!
//! Fetches the followin.io front page and extracts up to five
//! headline/link pairs from its article blocks.

use crate::error::FeedError;
use coinwatch_core::NewsItem;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// News page polled for headlines.
const NEWS_URL: &str = "https://followin.io/";

/// Browser-like user agent sent with the page request.
const USER_AGENT: &str = "Mozilla/5.0";

/// Article blocks scanned per fetch. Blocks that yield no title still
/// count toward this cap.
const MAX_ARTICLES: usize = 5;

/// Returned when the page responds with a non-success status.
pub const NEWS_UNAVAILABLE: &str = "Could not fetch news from followin.io";

/// Returned when the request itself fails.
pub const NEWS_FETCH_ERROR: &str = "Failed to fetch news.";

/// Returned when no headlines could be extracted.
pub const NO_NEWS: &str = "No news found";

/// Fetches and extracts headlines from the news page.
#[derive(Clone)]
pub struct NewsFetcher {
    client: reqwest::Client,
    page_url: String,
}

impl Default for NewsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            page_url: NEWS_URL.to_string(),
        }
    }

    /// Fetch the page and return the formatted headline list.
    ///
    /// Failures degrade to fixed sentinel strings; this never errors.
    pub async fn headlines(&self) -> String {
        headlines_from(self.fetch_page().await, &self.page_url)
    }

    async fn fetch_page(&self) -> Result<String, FeedError> {
        let response = self.client.get(&self.page_url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Collapse a page fetch result into the user-visible headline string.
fn headlines_from(page: Result<String, FeedError>, page_url: &str) -> String {
    match page {
        Ok(html) => format_headlines(&extract_items(&html, page_url)),
        Err(FeedError::HttpStatus(status)) => {
            warn!("News page returned HTTP {}", status);
            NEWS_UNAVAILABLE.to_string()
        }
        Err(e) => {
            warn!("News fetch failed: {}", e);
            NEWS_FETCH_ERROR.to_string()
        }
    }
}

/// Extract headline/link pairs from the page HTML.
///
/// Scans up to five article blocks. The title is the first of h2, h3, or
/// link text, in that preference order; blocks with no title are skipped.
/// The link is the first anchor href, with relative paths rewritten
/// against the page origin and absent links falling back to the page URL.
pub fn extract_items(html: &str, page_url: &str) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let articles = Selector::parse("article").expect("valid selector");
    let h2 = Selector::parse("h2").expect("valid selector");
    let h3 = Selector::parse("h3").expect("valid selector");
    let anchor = Selector::parse("a").expect("valid selector");
    let anchor_with_href = Selector::parse("a[href]").expect("valid selector");

    let mut items = Vec::new();

    for block in document.select(&articles).take(MAX_ARTICLES) {
        let title = first_text(&block, &h2)
            .or_else(|| first_text(&block, &h3))
            .or_else(|| first_text(&block, &anchor));

        let title = match title {
            Some(t) => t,
            None => continue,
        };

        let link = block
            .select(&anchor_with_href)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| absolutize(href, page_url))
            .unwrap_or_else(|| page_url.to_string());

        items.push(NewsItem::new(title, link));
    }

    items
}

/// Format extracted items as a bullet list, blank-line separated.
pub fn format_headlines(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return NO_NEWS.to_string();
    }

    items
        .iter()
        .map(|item| format!("🔹 {}\n{}", item.title, item.link))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First non-empty trimmed text among matching descendants.
fn first_text(block: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    block.select(selector).find_map(|el| {
        let text = el.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    })
}

/// Rewrite a relative href against the page origin.
fn absolutize(href: &str, page_url: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }

    match Url::parse(page_url) {
        Ok(url) => format!("{}{}", url.origin().ascii_serialization(), href),
        Err(_) => page_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = "https://followin.io/";

    #[test]
    fn test_extract_items_basic() {
        let html = r#"
            <html><body>
            <article><h2>Bitcoin rallies</h2><a href="/news/1">read</a></article>
            <article><h3>ETH upgrade ships</h3><a href="https://example.com/eth">read</a></article>
            </body></html>
        "#;

        let items = extract_items(html, PAGE);
        assert_eq!(
            items,
            vec![
                NewsItem::new("Bitcoin rallies", "https://followin.io/news/1"),
                NewsItem::new("ETH upgrade ships", "https://example.com/eth"),
            ]
        );
    }

    #[test]
    fn test_title_preference_order() {
        // h2 wins even when an anchor appears first in the block.
        let html = r#"
            <article>
              <a href="/x">anchor text</a>
              <h3>h3 title</h3>
              <h2>h2 title</h2>
            </article>
        "#;

        let items = extract_items(html, PAGE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "h2 title");
    }

    #[test]
    fn test_block_without_title_is_skipped() {
        let html = r#"
            <article><img src="/banner.png"></article>
            <article><h2>Real story</h2><a href="/s">go</a></article>
        "#;

        let items = extract_items(html, PAGE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Real story");
    }

    #[test]
    fn test_cap_counts_scanned_blocks() {
        // Six blocks, the first titleless: only blocks 2..=5 are kept, the
        // sixth is never scanned.
        let mut html = String::from("<article><img src='/x.png'></article>");
        for i in 1..=5 {
            html.push_str(&format!("<article><h2>Story {}</h2></article>", i));
        }

        let items = extract_items(&html, PAGE);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 1", "Story 2", "Story 3", "Story 4"]);
    }

    #[test]
    fn test_missing_link_falls_back_to_page_url() {
        let html = "<article><h2>No link here</h2></article>";

        let items = extract_items(html, PAGE);
        assert_eq!(items[0].link, PAGE);
    }

    #[test]
    fn test_format_headlines_empty() {
        assert_eq!(format_headlines(&[]), NO_NEWS);
    }

    #[test]
    fn test_format_headlines_joined() {
        let items = vec![
            NewsItem::new("One", "https://followin.io/1"),
            NewsItem::new("Two", "https://followin.io/2"),
        ];

        assert_eq!(
            format_headlines(&items),
            "🔹 One\nhttps://followin.io/1\n\n🔹 Two\nhttps://followin.io/2"
        );
    }

    #[test]
    fn test_http_error_yields_sentinel() {
        let result = headlines_from(Err(FeedError::HttpStatus(404)), PAGE);
        assert_eq!(result, NEWS_UNAVAILABLE);
    }

    #[test]
    fn test_transport_error_yields_sentinel() {
        let result = headlines_from(
            Err(FeedError::ConnectionFailed("timed out".to_string())),
            PAGE,
        );
        assert_eq!(result, NEWS_FETCH_ERROR);
    }

    #[test]
    fn test_empty_page_yields_no_news() {
        let result = headlines_from(Ok("<html><body></body></html>".to_string()), PAGE);
        assert_eq!(result, NO_NEWS);
    }
}
