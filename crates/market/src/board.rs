use std::future::Future;
use std::time::Duration;

use synth_series::Series;
use tracing::{info, warn};

use crate::client::MarketClient;
use crate::currency::Currency;
use crate::error::FetchError;
use crate::finnhub::{Profile, Quote};
use crate::history::{resolve_history, History};
use crate::row::MarketRow;

pub const DEFAULT_TRACKED_SYMBOLS: [&str; 20] = [
    "AAPL", "MSFT", "TSLA", "AMZN", "GOOGL", "NVDA", "META", "BRK.B", "JNJ", "V", "PG", "DIS",
    "MA", "PYPL", "ADBE", "CSCO", "INTC", "CRM", "NFLX", "ORCL",
];

/// The stock data the board and detail views need.
pub trait StockFeed {
    fn quote(&self, symbol: &str) -> impl Future<Output = Result<Quote, FetchError>> + Send;

    fn profile(&self, symbol: &str) -> impl Future<Output = Result<Profile, FetchError>> + Send;

    fn candles(
        &self,
        symbol: &str,
        now_millis: i64,
    ) -> impl Future<Output = Result<Option<Series>, FetchError>> + Send;

    fn fx_rate(&self, currency: Currency) -> impl Future<Output = f64> + Send;
}

impl StockFeed for MarketClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        MarketClient::quote(self, symbol).await
    }

    async fn profile(&self, symbol: &str) -> Result<Profile, FetchError> {
        MarketClient::profile(self, symbol).await
    }

    async fn candles(&self, symbol: &str, now_millis: i64) -> Result<Option<Series>, FetchError> {
        MarketClient::candles(self, symbol, now_millis).await
    }

    async fn fx_rate(&self, currency: Currency) -> f64 {
        MarketClient::fx_rate(self, currency).await
    }
}

/// Fetches one row per symbol, in order, one symbol at a time with `delay`
/// after each to stay under free-tier rate limits. A symbol whose quote or
/// profile fails gets a placeholder row instead of aborting the board; no
/// pause follows a failure that never reached the network.
pub async fn load_board<F: StockFeed>(
    feed: &F,
    symbols: &[String],
    currency: Currency,
    delay: Duration,
) -> Vec<MarketRow> {
    info!(symbols = symbols.len(), currency = currency.code(), "loading stock board");
    let fx_rate = feed.fx_rate(currency).await;

    let mut rows = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let (quote, profile) = tokio::join!(feed.quote(symbol), feed.profile(symbol));
        let (row, reached_network) = match (quote, profile) {
            (Ok(quote), Ok(profile)) => (
                MarketRow::from_quote(symbol, &quote, &profile, fx_rate),
                true,
            ),
            (Err(err), _) | (_, Err(err)) => {
                warn!(symbol = symbol.as_str(), error = %err, "stock fetch failed");
                (MarketRow::placeholder(symbol), err.reached_network())
            }
        };
        rows.push(row);

        if reached_network {
            tokio::time::sleep(delay).await;
        }
    }

    info!(rows = rows.len(), "stock board loaded");
    rows
}

/// Case-insensitive substring match on the row name (the symbol when the name
/// is empty). An empty query keeps every row.
pub fn search<'a>(rows: &'a [MarketRow], query: &str) -> Vec<&'a MarketRow> {
    let needle = query.trim().to_lowercase();
    rows.iter()
        .filter(|row| {
            let haystack = if row.name.is_empty() {
                &row.symbol
            } else {
                &row.name
            };
            haystack.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockDetail {
    pub symbol: String,
    pub profile: Profile,
    pub quote: Quote,
    pub history: History,
}

/// Profile and quote are required; history degrades to the placeholder series
/// anchored on the quoted price.
pub async fn load_stock_detail<F: StockFeed>(
    feed: &F,
    symbol: &str,
    now_millis: i64,
) -> Result<StockDetail, FetchError> {
    let (quote, profile, candles) = tokio::join!(
        feed.quote(symbol),
        feed.profile(symbol),
        feed.candles(symbol, now_millis)
    );
    let (quote, profile) = (quote?, profile?);
    let history = resolve_history(candles, symbol, quote.current_price(), now_millis);

    Ok(StockDetail {
        symbol: symbol.to_string(),
        profile,
        quote,
        history,
    })
}
