use market::{Currency, MarketRow};

use crate::chart::sparkline;
use crate::format::{format_change, format_price};

pub const EMPTY_BOARD_MESSAGE: &str =
    "No stocks available yet. Try refreshing or wait a moment (API rate limit may apply).";

const NAME_WIDTH: usize = 32;
const TREND_WIDTH: usize = 10;
const PRICE_WIDTH: usize = 16;
const CHANGE_WIDTH: usize = 10;

/// Board table with a placeholder mini chart per row, centred on the row's
/// current price.
pub fn market_table(rows: &[&MarketRow], currency: Currency, now_millis: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3}  {:<NAME_WIDTH$}  {:<TREND_WIDTH$}  {:>PRICE_WIDTH$}  {:>CHANGE_WIDTH$}  {}\n",
        "#", "Name", "Trend", "Price", "24H Change", "Market Cap"
    ));

    if rows.is_empty() {
        out.push_str(EMPTY_BOARD_MESSAGE);
        out.push('\n');
        return out;
    }

    for (index, row) in rows.iter().enumerate() {
        let chart_key = if row.symbol.is_empty() {
            format!("s{index}")
        } else {
            row.symbol.clone()
        };
        let mini = synth_series::generate(Some(chart_key.as_str()), row.current_price, now_millis);

        out.push_str(&format!(
            "{:>3}  {:<NAME_WIDTH$}  {:<TREND_WIDTH$}  {:>PRICE_WIDTH$}  {:>CHANGE_WIDTH$}  {}\n",
            index + 1,
            truncate(&format!("{} - {}", row.name, row.symbol), NAME_WIDTH),
            sparkline(&mini),
            format_price(currency, row.current_price),
            format_change(row.change_pct_24h),
            format_price(currency, row.market_cap),
        ));
    }
    out
}

pub fn board_error(kind: &str, error: &str) -> String {
    format!("Failed to load {kind}: {error}\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('\u{2026}');
    cut
}
