use clap::{Parser, Subcommand};
use market::Currency;

#[derive(Parser, Debug)]
#[command(version, about = "Crypto and stock market dashboard for the terminal", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Display currency; overrides DASHBOARD_CURRENCY.
    #[arg(long, global = true, value_parser = parse_currency)]
    pub currency: Option<Currency>,

    /// Print JSON instead of rendered tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Board of the tracked stock symbols.
    Stocks {
        /// Keep rows whose name contains this text.
        #[arg(long)]
        search: Option<String>,
    },

    /// Top coins by market cap.
    Coins {
        /// Keep rows whose name contains this text.
        #[arg(long)]
        search: Option<String>,
    },

    /// Quote, profile and ten-day history for one stock.
    Stock { symbol: String },

    /// Market data and ten-day history for one coin, by CoinGecko id.
    Coin { id: String },

    /// Placeholder history for a symbol, without touching the network.
    Placeholder {
        symbol: Option<String>,

        /// Centre the series on this price instead of the symbol-derived one.
        #[arg(long)]
        base: Option<f64>,

        /// Anchor timestamp in epoch milliseconds; defaults to now.
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,
    },
}

fn parse_currency(value: &str) -> Result<Currency, String> {
    Currency::parse(value).ok_or_else(|| format!("unknown currency `{value}`, expected usd, eur or inr"))
}
