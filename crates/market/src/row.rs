use serde::Serialize;

use crate::coingecko::CoinMarket;
use crate::finnhub::{Profile, Quote};

/// One line of a market board, prices already converted to the display
/// currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketRow {
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    #[serde(rename = "price_change_percentage_24h")]
    pub change_pct_24h: f64,
    pub market_cap: Option<f64>,
}

impl MarketRow {
    pub fn from_quote(symbol: &str, quote: &Quote, profile: &Profile, fx_rate: f64) -> Self {
        let price = quote.current_price();
        let previous_close = quote.previous_close_price();
        let change_pct_24h = match (price, previous_close) {
            (Some(price), Some(previous_close)) => {
                round_cents_half_up((price - previous_close) / previous_close * 100.0)
            }
            _ => 0.0,
        };

        Self {
            symbol: symbol.to_string(),
            name: profile.display_name().unwrap_or(symbol).to_string(),
            image: profile.logo_url().map(str::to_string),
            current_price: price.map(|price| price * fx_rate),
            previous_close: previous_close.map(|close| close * fx_rate),
            change_pct_24h,
            market_cap: profile
                .market_capitalization
                .filter(|cap| *cap != 0.0 && cap.is_finite()),
        }
    }

    /// Row for a symbol whose quote or profile could not be fetched.
    pub fn placeholder(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            image: None,
            current_price: None,
            previous_close: None,
            change_pct_24h: 0.0,
            market_cap: None,
        }
    }
}

impl From<CoinMarket> for MarketRow {
    fn from(coin: CoinMarket) -> Self {
        Self {
            symbol: coin.symbol.to_uppercase(),
            name: coin.name,
            image: coin.image,
            current_price: coin.current_price,
            previous_close: None,
            change_pct_24h: coin
                .price_change_percentage_24h
                .filter(|change| change.is_finite())
                .unwrap_or(0.0),
            market_cap: coin.market_cap,
        }
    }
}

/// `Math.round(x * 100) / 100`: halves go towards positive infinity.
fn round_cents_half_up(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    let cents = if scaled - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    cents / 100.0
}
