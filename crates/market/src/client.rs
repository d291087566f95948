use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use synth_series::{Series, DAY_MILLIS};
use tracing::{debug, warn};

use crate::coingecko::{
    CoinDetail, CoinMarket, MarketChart, COINGECKO_BASE_URL, COINGECKO_KEY_HEADER,
};
use crate::currency::Currency;
use crate::error::{decode, FetchError};
use crate::finnhub::{Candles, Profile, Quote, FINNHUB_BASE_URL};
use crate::fx::{parse_fx_rate, FX_BASE_URL};

pub const HISTORY_DAYS: i64 = 10;
const COIN_MARKETS_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub finnhub: String,
    pub coingecko: String,
    pub fx: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            finnhub: FINNHUB_BASE_URL.to_string(),
            coingecko: COINGECKO_BASE_URL.to_string(),
            fx: FX_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub endpoints: Endpoints,
    pub finnhub_token: Option<String>,
    pub coingecko_api_key: Option<String>,
    pub timeout: Option<Duration>,
}

/// Thin wrapper over the three public market APIs the dashboard reads.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: Client,
    endpoints: Endpoints,
    finnhub_token: Option<String>,
    coingecko_api_key: Option<String>,
}

impl MarketClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            http,
            endpoints: settings.endpoints,
            finnhub_token: settings.finnhub_token,
            coingecko_api_key: settings.coingecko_api_key,
        })
    }

    pub async fn quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        let endpoint = "finnhub/quote";
        let request = self
            .finnhub(endpoint, "/quote")?
            .query(&[("symbol", symbol)]);
        self.get_json(endpoint, request).await
    }

    pub async fn profile(&self, symbol: &str) -> Result<Profile, FetchError> {
        let endpoint = "finnhub/stock/profile2";
        let request = self
            .finnhub(endpoint, "/stock/profile2")?
            .query(&[("symbol", symbol)]);
        self.get_json(endpoint, request).await
    }

    /// Daily closes for the last [`HISTORY_DAYS`] days. `Ok(None)` when
    /// Finnhub answers but has no candles for the window.
    pub async fn candles(&self, symbol: &str, now_millis: i64) -> Result<Option<Series>, FetchError> {
        let endpoint = "finnhub/stock/candle";
        let to = now_millis.div_euclid(1000);
        let from = to - HISTORY_DAYS * DAY_MILLIS / 1000;
        let request = self
            .finnhub(endpoint, "/stock/candle")?
            .query(&[("symbol", symbol), ("resolution", "D")])
            .query(&[("from", from), ("to", to)]);
        let candles: Candles = self.get_json(endpoint, request).await?;
        Ok(candles.into_series())
    }

    /// USD -> `currency`; never fails, unusable answers leave prices in USD.
    pub async fn fx_rate(&self, currency: Currency) -> f64 {
        if currency == Currency::Usd {
            return 1.0;
        }

        let endpoint = "fx/latest";
        let request = self
            .http
            .get(format!("{}/latest", self.endpoints.fx))
            .query(&[("base", "USD"), ("symbols", currency.code())]);
        match self.get_text(endpoint, request).await {
            Ok(body) => parse_fx_rate(&body, currency),
            Err(err) => {
                warn!(currency = currency.code(), error = %err, "fx fetch failed, defaulting to 1");
                1.0
            }
        }
    }

    pub async fn coin(&self, id: &str) -> Result<CoinDetail, FetchError> {
        let request = self.coingecko(&format!("/coins/{id}"));
        self.get_json("coingecko/coins", request).await
    }

    pub async fn coin_chart(&self, id: &str, currency: Currency) -> Result<Series, FetchError> {
        let days = HISTORY_DAYS.to_string();
        let request = self
            .coingecko(&format!("/coins/{id}/market_chart"))
            .query(&[
                ("vs_currency", currency.name()),
                ("days", days.as_str()),
                ("interval", "daily"),
            ]);
        let chart: MarketChart = self.get_json("coingecko/market_chart", request).await?;
        Ok(chart.into_series())
    }

    pub async fn coin_markets(&self, currency: Currency) -> Result<Vec<CoinMarket>, FetchError> {
        let per_page = COIN_MARKETS_PAGE_SIZE.to_string();
        let request = self.coingecko("/coins/markets").query(&[
            ("vs_currency", currency.name()),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
        ]);
        self.get_json("coingecko/coins/markets", request).await
    }

    fn finnhub(&self, endpoint: &'static str, path: &str) -> Result<RequestBuilder, FetchError> {
        let token = self
            .finnhub_token
            .as_deref()
            .ok_or(FetchError::MissingCredential {
                endpoint,
                setting: "FINNHUB_TOKEN",
            })?;
        Ok(self
            .http
            .get(format!("{}{path}", self.endpoints.finnhub))
            .query(&[("token", token)]))
    }

    fn coingecko(&self, path: &str) -> RequestBuilder {
        let request = self
            .http
            .get(format!("{}{path}", self.endpoints.coingecko))
            .header(reqwest::header::ACCEPT, "application/json");
        match self.coingecko_api_key.as_deref() {
            Some(key) => request.header(COINGECKO_KEY_HEADER, key),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, FetchError> {
        let body = self.get_text(endpoint, request).await?;
        decode(endpoint, &body)
    }

    async fn get_text(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<String, FetchError> {
        let response = request
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;
        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
