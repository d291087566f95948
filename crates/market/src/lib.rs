pub mod board;
pub mod client;
pub mod coingecko;
pub mod currency;
pub mod error;
pub mod finnhub;
pub mod fx;
pub mod history;
pub mod row;

pub use board::{load_board, load_stock_detail, search, StockDetail, StockFeed};
pub use client::{ClientSettings, Endpoints, MarketClient};
pub use currency::Currency;
pub use error::FetchError;
pub use history::{resolve_history, History, HistorySource};
pub use row::MarketRow;
