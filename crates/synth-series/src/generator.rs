use crate::config::SeriesConfig;
use crate::round::round2;
use crate::seed::seed;
use crate::series::{PricePoint, Series};

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_INDEX_STEP: u64 = 233;
const LCG_MODULUS: u64 = 233280;

const DEFAULT_BASE_OFFSET: f64 = 50.0;
const DEFAULT_BASE_RANGE: u32 = 300;

/// Placeholder history keyed on an identifier, used wherever real history is
/// unavailable. The output depends only on the arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesGenerator {
    config: SeriesConfig,
}

impl SeriesGenerator {
    pub fn new(config: SeriesConfig) -> Self {
        assert!(config.spacing_ms >= 0, "spacing_ms must be non-negative");
        assert!(
            config.noise_span.is_finite() && config.price_floor.is_finite(),
            "noise_span and price_floor must be finite"
        );

        Self { config }
    }

    pub fn generate(
        &self,
        identifier: Option<&str>,
        base_value: Option<f64>,
        now_millis: i64,
    ) -> Series {
        let noise = NoiseSource::new(seed(identifier));
        let base = base_value
            .filter(|value| value.is_finite())
            .unwrap_or_else(|| noise.default_base());
        let amplitude = base * self.config.noise_span;

        let prices = (0..self.config.points)
            .rev()
            .map(|days_back| {
                let offset = (days_back as i64).saturating_mul(self.config.spacing_ms);
                let timestamp_millis = now_millis.saturating_sub(offset);
                let jitter = (noise.unit(days_back as u64) - 0.5) * amplitude;
                let price = round2(base + jitter)
                    .max(self.config.price_floor)
                    .min(f64::MAX);
                PricePoint::new(timestamp_millis, price)
            })
            .collect();

        Series::new(prices)
    }
}

/// Ten daily points ending at `now_millis`, centred on `base_value` when it is
/// finite and on a seed-derived value in `[50, 349]` otherwise.
pub fn generate(identifier: Option<&str>, base_value: Option<f64>, now_millis: i64) -> Series {
    SeriesGenerator::default().generate(identifier, base_value, now_millis)
}

#[derive(Debug, Clone, Copy)]
struct NoiseSource {
    seed: u32,
}

impl NoiseSource {
    fn new(seed: u32) -> Self {
        Self { seed }
    }

    fn default_base(self) -> f64 {
        DEFAULT_BASE_OFFSET + f64::from(self.seed % DEFAULT_BASE_RANGE)
    }

    /// Value in `[0, 1)` for the `n`-th point.
    fn unit(self, n: u64) -> f64 {
        let value = (u64::from(self.seed) * LCG_MULTIPLIER
            + LCG_INCREMENT
            + n.wrapping_mul(LCG_INDEX_STEP))
            % LCG_MODULUS;
        value as f64 / LCG_MODULUS as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{generate, NoiseSource, SeriesGenerator};
    use crate::config::SeriesConfig;
    use crate::series::DAY_MILLIS;

    const NOW: i64 = 1_700_000_000_000;

    fn prices(identifier: Option<&str>, base: Option<f64>, now: i64) -> Vec<f64> {
        generate(identifier, base, now)
            .prices
            .iter()
            .map(|point| point.price)
            .collect()
    }

    #[test]
    fn repeated_calls_are_identical() {
        for identifier in ["AAPL", "bitcoin", "", "BRK.B"] {
            let a = generate(Some(identifier), None, NOW);
            let b = generate(Some(identifier), None, NOW);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn window_has_ten_daily_points_ending_now() {
        let series = generate(Some("TSLA"), Some(250.0), NOW);

        assert_eq!(series.len(), 10);
        assert_eq!(series.prices[0].timestamp_millis, NOW - 9 * DAY_MILLIS);
        assert_eq!(series.last().unwrap().timestamp_millis, NOW);
        for pair in series.prices.windows(2) {
            assert_eq!(pair[1].timestamp_millis - pair[0].timestamp_millis, DAY_MILLIS);
        }
    }

    #[test]
    fn fallback_identifiers_are_equivalent() {
        let expected = generate(Some("x"), Some(42.0), NOW);

        assert_eq!(generate(None, Some(42.0), NOW), expected);
        assert_eq!(generate(Some(""), Some(42.0), NOW), expected);
    }

    #[test]
    fn reference_series_for_fallback_identifier() {
        assert_eq!(
            prices(Some("x"), Some(100.0), NOW),
            vec![97.03, 97.02, 97.02, 97.01, 97.0, 103.0, 102.99, 102.99, 102.98, 102.97]
        );
    }

    #[test]
    fn reference_series_with_seed_derived_base() {
        // seed("AAPL") = 2_001_436, so the base is 50 + 136 = 186.
        assert_eq!(
            prices(Some("AAPL"), None, NOW),
            vec![186.65, 186.64, 186.63, 186.61, 186.6, 186.59, 186.58, 186.57, 186.56, 186.55]
        );
    }

    #[test]
    fn observed_price_anchors_the_series() {
        let base = 187.44;
        let series = generate(Some("AAPL"), Some(base), 0);

        assert_eq!(series.prices[0].price, 188.09);
        assert_eq!(series.last().unwrap().price, 187.99);
        for point in &series.prices {
            assert!((point.price - base).abs() <= base * 0.03 + 0.005);
        }
    }

    #[test]
    fn prices_never_drop_below_floor() {
        for base in [0.0, 0.05, -10.0, -1e9, 1e-12] {
            for point in &generate(Some("DOGE"), Some(base), NOW).prices {
                assert!(point.price >= 0.1, "{base} produced {}", point.price);
            }
        }
    }

    #[test]
    fn non_finite_base_uses_seed_derived_default() {
        let expected = generate(Some("AAPL"), None, NOW);

        assert_eq!(generate(Some("AAPL"), Some(f64::NAN), NOW), expected);
        assert_eq!(generate(Some("AAPL"), Some(f64::INFINITY), NOW), expected);
        assert_eq!(generate(Some("AAPL"), Some(f64::NEG_INFINITY), NOW), expected);
    }

    #[test]
    fn huge_base_stays_finite() {
        for point in &generate(Some("AAPL"), Some(f64::MAX), NOW).prices {
            assert!(point.price.is_finite());
        }
    }

    #[test]
    fn extreme_timestamps_saturate() {
        let series = generate(Some("x"), None, i64::MIN);

        assert_eq!(series.len(), 10);
        assert_eq!(series.prices[0].timestamp_millis, i64::MIN);
        assert_eq!(series.last().unwrap().timestamp_millis, i64::MIN);

        let series = generate(Some("x"), None, i64::MAX);
        assert_eq!(series.last().unwrap().timestamp_millis, i64::MAX);
    }

    #[test]
    fn noise_unit_stays_in_half_open_range() {
        for seed in [0, 1, 120, 2_001_436, u32::MAX] {
            let noise = NoiseSource::new(seed);
            for n in 0..1_000 {
                let unit = noise.unit(n);
                assert!((0.0..1.0).contains(&unit));
            }
        }
    }

    #[test]
    fn seed_derived_base_stays_in_range() {
        for seed in [0, 299, 300, 2_001_436, u32::MAX] {
            let base = NoiseSource::new(seed).default_base();
            assert!((50.0..=349.0).contains(&base));
        }
    }

    #[test]
    fn custom_window_length_is_honoured() {
        let generator = SeriesGenerator::new(SeriesConfig {
            points: 30,
            ..SeriesConfig::default()
        });

        let series = generator.generate(Some("ETH"), Some(3_000.0), NOW);

        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap().timestamp_millis, NOW);
    }

    #[test]
    #[should_panic(expected = "spacing_ms must be non-negative")]
    fn generator_rejects_negative_spacing() {
        let _ = SeriesGenerator::new(SeriesConfig {
            spacing_ms: -1,
            ..SeriesConfig::default()
        });
    }
}
