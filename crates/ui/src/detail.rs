use market::coingecko::CoinDetail;
use market::{Currency, History, StockDetail};
use synth_series::Series;

use crate::chart::line_chart;
use crate::format::{format_amount, format_price};

pub const CHART_WIDTH: usize = 40;
const PLACEHOLDER_NOTE: &str = "(live history unavailable, showing placeholder series)";

pub fn stock_detail(detail: &StockDetail) -> String {
    let name = detail.profile.display_name().unwrap_or(&detail.symbol);
    let quote = &detail.quote;
    let usd = Currency::Usd;

    let mut out = String::new();
    out.push_str(&format!("{name} ({})\n", detail.symbol));
    if let Some(logo) = detail.profile.logo_url() {
        out.push_str(&format!("{logo}\n"));
    }
    out.push('\n');
    push_history(&mut out, &detail.history);
    out.push('\n');
    push_stats(
        &mut out,
        &[
            ("Current Price (USD)", format_price(usd, quote.current_price())),
            ("Previous Close", format_price(usd, quote.previous_close)),
            ("High (day)", format_price(usd, quote.high)),
            ("Low (day)", format_price(usd, quote.low)),
        ],
    );
    out
}

pub fn coin_detail(coin: &CoinDetail, chart: &Series, currency: Currency) -> String {
    let stats = coin.stats(currency);

    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", coin.name, coin.ticker()));
    if let Some(image) = coin.image.large.as_deref() {
        out.push_str(&format!("{image}\n"));
    }
    out.push('\n');
    for line in line_chart(chart, CHART_WIDTH) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    push_stats(
        &mut out,
        &[
            (
                "Crypto Market Rank",
                stats
                    .rank
                    .map(|rank| rank.to_string())
                    .unwrap_or_else(|| format_amount(None)),
            ),
            ("Current Price", format_price(currency, stats.current_price)),
            ("Market cap", format_price(currency, stats.market_cap)),
            ("24 Hour high", format_price(currency, stats.high_24h)),
            ("24 Hour low", format_price(currency, stats.low_24h)),
        ],
    );
    out
}

/// Chart for a bare history, e.g. a placeholder series requested directly.
pub fn history_view(title: &str, history: &History) -> String {
    let mut out = format!("{title}\n\n");
    push_history(&mut out, history);
    out
}

pub fn detail_error(kind: &str, error: &str) -> String {
    format!("Failed to load {kind} data\n{error}\n")
}

fn push_history(out: &mut String, history: &History) {
    for line in line_chart(&history.series, CHART_WIDTH) {
        out.push_str(&line);
        out.push('\n');
    }
    if history.is_synthetic() {
        out.push_str(PLACEHOLDER_NOTE);
        out.push('\n');
    }
}

fn push_stats(out: &mut String, stats: &[(&str, String)]) {
    let label_width = stats.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in stats {
        out.push_str(&format!("{label:<label_width$}  {value}\n"));
    }
}
