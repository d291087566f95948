use serde::Deserialize;
use synth_series::{PricePoint, Series};

pub const FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

/// `/quote` payload. Finnhub answers unknown symbols with zeros, so callers
/// treat `0.0` the same as a missing value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Quote {
    #[serde(rename = "c")]
    pub current: Option<f64>,
    #[serde(rename = "h")]
    pub high: Option<f64>,
    #[serde(rename = "l")]
    pub low: Option<f64>,
    #[serde(rename = "o")]
    pub open: Option<f64>,
    #[serde(rename = "pc")]
    pub previous_close: Option<f64>,
    #[serde(rename = "t")]
    pub timestamp: Option<i64>,
}

impl Quote {
    pub fn current_price(&self) -> Option<f64> {
        non_zero(self.current)
    }

    pub fn previous_close_price(&self) -> Option<f64> {
        non_zero(self.previous_close)
    }
}

/// `/stock/profile2` payload; an empty object for symbols Finnhub does not cover.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "marketCapitalization")]
    pub market_capitalization: Option<f64>,
}

impl Profile {
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo.as_deref().filter(|logo| !logo.is_empty())
    }
}

/// `/stock/candle` payload: parallel arrays of unix seconds and closes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Candles {
    #[serde(rename = "s", default)]
    pub status: String,
    #[serde(rename = "t")]
    pub timestamps: Option<Vec<i64>>,
    #[serde(rename = "c")]
    pub closes: Option<Vec<f64>>,
}

impl Candles {
    pub fn into_series(self) -> Option<Series> {
        if self.status != "ok" {
            return None;
        }

        let (timestamps, closes) = (self.timestamps?, self.closes?);
        let prices = timestamps
            .into_iter()
            .zip(closes)
            .map(|(secs, close)| PricePoint::new(secs.saturating_mul(1000), close))
            .collect();

        Some(Series::new(prices))
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|value| *value != 0.0 && value.is_finite())
}
