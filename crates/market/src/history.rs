use serde::Serialize;
use synth_series::Series;
use tracing::{debug, warn};

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySource {
    Live,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    pub source: HistorySource,
    #[serde(flatten)]
    pub series: Series,
}

impl History {
    pub fn live(series: Series) -> Self {
        Self {
            source: HistorySource::Live,
            series,
        }
    }

    pub fn synthetic(symbol: &str, live_price: Option<f64>, now_millis: i64) -> Self {
        let base = live_price.filter(|price| *price != 0.0);
        Self {
            source: HistorySource::Synthetic,
            series: synth_series::generate(Some(symbol), base, now_millis),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == HistorySource::Synthetic
    }
}

/// Keeps fetched history when it has points; otherwise substitutes the
/// placeholder series for `symbol`, centred on the live price when one is known.
pub fn resolve_history(
    fetched: Result<Option<Series>, FetchError>,
    symbol: &str,
    live_price: Option<f64>,
    now_millis: i64,
) -> History {
    match fetched {
        Ok(Some(series)) if !series.is_empty() => {
            debug!(symbol, points = series.len(), "using live history");
            History::live(series)
        }
        Ok(_) => {
            warn!(symbol, "history payload has no usable candles, using placeholder");
            History::synthetic(symbol, live_price, now_millis)
        }
        Err(err) => {
            warn!(symbol, error = %err, "history fetch failed, using placeholder");
            History::synthetic(symbol, live_price, now_millis)
        }
    }
}
