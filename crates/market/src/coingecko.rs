use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use synth_series::{PricePoint, Series};

use crate::currency::Currency;

pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const COINGECKO_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Per-currency price maps; CoinGecko sends `null` for currencies it cannot quote.
type CurrencyMap = HashMap<String, Option<f64>>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

impl MarketChart {
    pub fn into_series(self) -> Series {
        let prices = self
            .prices
            .into_iter()
            .map(|(millis, price)| PricePoint::new(millis as i64, price))
            .collect();
        Series::new(prices)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoinImage {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: CurrencyMap,
    #[serde(default)]
    pub market_cap: CurrencyMap,
    #[serde(default)]
    pub high_24h: CurrencyMap,
    #[serde(default)]
    pub low_24h: CurrencyMap,
}

/// `/coins/{id}` payload, trimmed to what the detail view shows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: CoinImage,
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub market_data: CoinMarketData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoinStats {
    pub rank: Option<u32>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
}

impl CoinDetail {
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }

    pub fn stats(&self, currency: Currency) -> CoinStats {
        let pick = |map: &CurrencyMap| map.get(currency.name()).copied().flatten();
        let data = &self.market_data;

        CoinStats {
            rank: self.market_cap_rank,
            current_price: pick(&data.current_price),
            market_cap: pick(&data.market_cap),
            high_24h: pick(&data.high_24h),
            low_24h: pick(&data.low_24h),
        }
    }
}

/// One entry of `/coins/markets`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<f64>,
}
