use market::coingecko::CoinDetail;
use market::{
    load_board, load_stock_detail, search, ClientSettings, Currency, Endpoints, FetchError, History,
    HistorySource, MarketClient, MarketRow, StockDetail,
};
use serde_json::json;
use synth_series::{Series, FALLBACK_IDENTIFIER};
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::Config;

/// Rendered view plus whether it loaded cleanly; a failed view still has text
/// to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub ok: bool,
}

impl Outcome {
    fn loaded(output: String) -> Self {
        Self { output, ok: true }
    }

    fn failed(output: String) -> Self {
        Self { output, ok: false }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn build_client(config: &Config) -> Result<MarketClient, FetchError> {
    if config.finnhub_token.is_none() {
        warn!("FINNHUB_TOKEN is not set, stock quotes will be unavailable");
    }

    MarketClient::new(ClientSettings {
        endpoints: Endpoints::default(),
        finnhub_token: config.finnhub_token.clone(),
        coingecko_api_key: config.coingecko_api_key.clone(),
        timeout: Some(config.http_timeout),
    })
}

pub async fn run(
    command: &Command,
    config: &Config,
    currency: Currency,
    format: OutputFormat,
    now_millis: i64,
) -> Result<Outcome, RunError> {
    match command {
        Command::Placeholder { symbol, base, now } => {
            let history = History {
                source: HistorySource::Synthetic,
                series: synth_series::generate(symbol.as_deref(), *base, now.unwrap_or(now_millis)),
            };
            let title = symbol.as_deref().unwrap_or(FALLBACK_IDENTIFIER);
            let output = match format {
                OutputFormat::Text => ui::history_view(title, &history),
                OutputFormat::Json => to_json(&history)?,
            };
            Ok(Outcome::loaded(output))
        }
        Command::Stocks { search: query } => {
            let client = build_client(config)?;
            let rows = load_board(&client, &config.symbols, currency, config.fetch_delay).await;
            let output = render_board(&rows, query.as_deref(), currency, format, now_millis)?;
            Ok(Outcome::loaded(output))
        }
        Command::Coins { search: query } => {
            let client = build_client(config)?;
            match client.coin_markets(currency).await {
                Ok(coins) => {
                    info!(coins = coins.len(), "coin board loaded");
                    let rows: Vec<MarketRow> = coins.into_iter().map(MarketRow::from).collect();
                    let output = render_board(&rows, query.as_deref(), currency, format, now_millis)?;
                    Ok(Outcome::loaded(output))
                }
                Err(err) => {
                    warn!(error = %err, "coin board failed");
                    Ok(Outcome::failed(ui::board_error("coins", &err.to_string())))
                }
            }
        }
        Command::Stock { symbol } => {
            let client = build_client(config)?;
            let symbol = symbol.trim().to_uppercase();
            match load_stock_detail(&client, &symbol, now_millis).await {
                Ok(detail) => {
                    let output = match format {
                        OutputFormat::Text => ui::stock_detail(&detail),
                        OutputFormat::Json => to_json(&stock_json(&detail))?,
                    };
                    Ok(Outcome::loaded(output))
                }
                Err(err) => {
                    warn!(symbol = symbol.as_str(), error = %err, "stock detail failed");
                    Ok(Outcome::failed(ui::detail_error("stock", &err.to_string())))
                }
            }
        }
        Command::Coin { id } => {
            let client = build_client(config)?;
            let id = id.trim().to_lowercase();
            let (coin, chart) = tokio::join!(client.coin(&id), client.coin_chart(&id, currency));
            match coin.and_then(|coin| Ok((coin, chart?))) {
                Ok((coin, chart)) => {
                    let output = match format {
                        OutputFormat::Text => ui::coin_detail(&coin, &chart, currency),
                        OutputFormat::Json => to_json(&coin_json(&coin, &chart, currency))?,
                    };
                    Ok(Outcome::loaded(output))
                }
                Err(err) => {
                    warn!(coin = id.as_str(), error = %err, "coin detail failed");
                    Ok(Outcome::failed(ui::detail_error("coin", &err.to_string())))
                }
            }
        }
    }
}

fn render_board(
    rows: &[MarketRow],
    query: Option<&str>,
    currency: Currency,
    format: OutputFormat,
    now_millis: i64,
) -> Result<String, serde_json::Error> {
    let visible = search(rows, query.unwrap_or_default());
    match format {
        OutputFormat::Text => Ok(ui::market_table(&visible, currency, now_millis)),
        OutputFormat::Json => to_json(&visible),
    }
}

fn stock_json(detail: &StockDetail) -> serde_json::Value {
    let quote = &detail.quote;
    json!({
        "symbol": detail.symbol,
        "name": detail.profile.display_name().unwrap_or(&detail.symbol),
        "logo": detail.profile.logo_url(),
        "currency": Currency::Usd,
        "current_price": quote.current_price(),
        "previous_close": quote.previous_close,
        "high": quote.high,
        "low": quote.low,
        "history": detail.history,
    })
}

fn coin_json(coin: &CoinDetail, chart: &Series, currency: Currency) -> serde_json::Value {
    json!({
        "id": coin.id,
        "symbol": coin.ticker(),
        "name": coin.name,
        "image": coin.image.large,
        "currency": currency,
        "stats": coin.stats(currency),
        "history": chart,
    })
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut encoded = serde_json::to_string_pretty(value)?;
    encoded.push('\n');
    Ok(encoded)
}
