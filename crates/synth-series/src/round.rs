const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Rounds to two decimal places, ties away from zero, deciding ties on the
/// exact binary value rather than on the already-rounded `value * 100`.
///
/// The result is the `f64` nearest to the two-decimal string, the same value
/// a `toFixed(2)` followed by a reparse produces.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value < 0.0 {
        return -round2(-value);
    }

    let scaled = value * 100.0;
    if scaled >= EXACT_INTEGER_LIMIT {
        return value;
    }

    // error-free product: value * 100 == scaled + residual exactly
    let residual = value.mul_add(100.0, -scaled);
    let floor = scaled.floor();
    let excess = (scaled - floor) - 0.5;

    let cents = if excess > 0.0 || (excess == 0.0 && residual >= 0.0) {
        floor + 1.0
    } else {
        floor
    };

    cents / 100.0
}
