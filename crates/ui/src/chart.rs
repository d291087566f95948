use synth_series::Series;

use crate::format::{format_amount, format_day};

const LEVELS: [char; 8] = [
    '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}',
];
const BAR: char = '\u{2588}';

/// One block glyph per point, scaled between the series minimum and maximum.
/// A flat series sits on the middle level.
pub fn sparkline(series: &Series) -> String {
    let Some((min, max)) = series.min_max() else {
        return String::new();
    };
    let top = LEVELS.len() - 1;

    series
        .prices
        .iter()
        .map(|point| {
            let level = scale(point.price, min, max, top).unwrap_or(top / 2);
            LEVELS[level]
        })
        .collect()
}

/// Horizontal bar chart, one line per point: date, bar, price.
pub fn line_chart(series: &Series, width: usize) -> Vec<String> {
    let Some((min, max)) = series.min_max() else {
        return Vec::new();
    };
    let width = width.max(1);
    // bars start at one cell so the minimum is still visible
    let floor = min - (max - min) / width as f64;

    series
        .prices
        .iter()
        .map(|point| {
            let cells = scale(point.price, floor, max, width).unwrap_or(width);
            format!(
                "{}  {:<width$}  {}",
                format_day(point.timestamp_millis),
                BAR.to_string().repeat(cells),
                format_amount(Some(point.price)),
            )
        })
        .collect()
}

fn scale(value: f64, min: f64, max: f64, steps: usize) -> Option<usize> {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) {
        return None;
    }
    let ratio = ((value - min) / span).clamp(0.0, 1.0);
    Some((ratio * steps as f64).round() as usize)
}
