mod config;
mod generator;
mod round;
mod seed;
mod series;

pub use config::SeriesConfig;
pub use generator::{generate, SeriesGenerator};
pub use round::round2;
pub use seed::{seed, FALLBACK_IDENTIFIER};
pub use series::{PricePoint, Series, DAY_MILLIS};
