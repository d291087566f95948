use market::Currency;
use time::macros::format_description;
use time::OffsetDateTime;

pub const MISSING: &str = "-";

const FRACTION_DIGITS: usize = 3;

/// Thousands-grouped with at most three fraction digits and trailing zeros
/// dropped, e.g. `1234567.891` -> `1,234,567.891`, `0.1` -> `0.1`.
pub fn format_amount(value: Option<f64>) -> String {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return MISSING.to_string();
    };

    let (integer, fraction) = round_fraction(value.abs(), FRACTION_DIGITS);
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(integer.len() + integer.len() / 3 + fraction.len() + 2);
    if value < 0.0 && (integer != "0" || !fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(&integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

pub fn format_price(currency: Currency, value: Option<f64>) -> String {
    match value.filter(|value| value.is_finite()) {
        Some(value) => format!("{} {}", currency.symbol(), format_amount(Some(value))),
        None => format!("{} {MISSING}", currency.symbol()),
    }
}

pub fn format_change(change_pct: f64) -> String {
    if change_pct > 0.0 {
        format!("+{change_pct:.2}%")
    } else {
        format!("{change_pct:.2}%")
    }
}

/// `MM/DD` in UTC for an epoch-millisecond timestamp.
pub fn format_day(timestamp_millis: i64) -> String {
    OffsetDateTime::from_unix_timestamp(timestamp_millis.div_euclid(1000))
        .ok()
        .and_then(|moment| moment.format(format_description!("[month]/[day]")).ok())
        .unwrap_or_else(|| "--/--".to_string())
}

/// Splits the shortest decimal form of a non-negative `magnitude` into integer
/// digits and exactly `digits` fraction digits, rounding halves away from zero
/// the way `toLocaleString` does.
fn round_fraction(magnitude: f64, digits: usize) -> (String, String) {
    // `Display` for f64 is the shortest round-trip form and never uses exponents
    let shortest = magnitude.to_string();
    let (integer, fraction) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut kept: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();
    let round_up = fraction.as_bytes().get(digits).is_some_and(|next| *next >= b'5');

    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let fraction = kept.split_off(split);
    (
        String::from_utf8_lossy(&kept).into_owned(),
        String::from_utf8_lossy(&fraction).into_owned(),
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
