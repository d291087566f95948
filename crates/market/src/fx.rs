use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use crate::currency::Currency;

pub const FX_BASE_URL: &str = "https://api.exchangerate.host";

#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    rates: HashMap<String, serde_json::Value>,
}

/// USD -> `currency` rate from an exchangerate.host `latest` payload. Any
/// unusable answer degrades to `1.0` so prices stay in USD.
pub fn parse_fx_rate(payload: &str, currency: Currency) -> f64 {
    if currency == Currency::Usd {
        return 1.0;
    }

    let rates: LatestRates = match serde_json::from_str(payload) {
        Ok(rates) => rates,
        Err(err) => {
            warn!(currency = currency.code(), error = %err, "fx payload is not valid json");
            return 1.0;
        }
    };

    rates
        .rates
        .get(currency.code())
        .and_then(rate_value)
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .unwrap_or_else(|| {
            warn!(currency = currency.code(), "fx payload has no usable rate");
            1.0
        })
}

// exchangerate.host has served rates both as numbers and as strings
fn rate_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
