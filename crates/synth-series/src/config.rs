use crate::series::DAY_MILLIS;

/// Window shape and noise parameters for synthetic history. The defaults are
/// the placeholder charts the dashboard has always drawn; changing them
/// changes every generated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesConfig {
    pub points: usize,
    pub spacing_ms: i64,
    /// Peak-to-peak noise as a fraction of the base value.
    pub noise_span: f64,
    pub price_floor: f64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            points: 10,
            spacing_ms: DAY_MILLIS,
            noise_span: 0.06,
            price_floor: 0.1,
        }
    }
}
