pub mod board;
pub mod chart;
pub mod detail;
pub mod format;

pub use board::{board_error, market_table, EMPTY_BOARD_MESSAGE};
pub use chart::{line_chart, sparkline};
pub use detail::{coin_detail, detail_error, history_view, stock_detail};
pub use format::{format_amount, format_change, format_price};
