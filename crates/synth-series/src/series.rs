use serde::{Deserialize, Serialize};

pub const DAY_MILLIS: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct PricePoint {
    pub timestamp_millis: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_millis: i64, price: f64) -> Self {
        Self {
            timestamp_millis,
            price,
        }
    }
}

impl From<(i64, f64)> for PricePoint {
    fn from((timestamp_millis, price): (i64, f64)) -> Self {
        Self::new(timestamp_millis, price)
    }
}

impl From<PricePoint> for (i64, f64) {
    fn from(point: PricePoint) -> Self {
        (point.timestamp_millis, point.price)
    }
}

/// Price history in ascending timestamp order, shaped on the wire as
/// `{"prices": [[t, p], ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub prices: Vec<PricePoint>,
}

impl Series {
    pub fn new(prices: Vec<PricePoint>) -> Self {
        Self { prices }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.prices.last()
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.prices.iter().map(|point| point.price).fold(None, |acc, price| {
            Some(match acc {
                None => (price, price),
                Some((min, max)) => (min.min(price), max.max(price)),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{PricePoint, Series};

    #[test]
    fn series_serializes_as_prices_array_of_pairs() {
        let series = Series::new(vec![
            PricePoint::new(1_699_913_600_000, 101.5),
            PricePoint::new(1_700_000_000_000, 102.25),
        ]);

        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(
            json,
            json!({
                "prices": [
                    [1_699_913_600_000_i64, 101.5],
                    [1_700_000_000_000_i64, 102.25],
                ]
            })
        );
    }

    #[test]
    fn series_deserializes_from_prices_payload() {
        let payload = r#"{"prices":[[1000,1.5],[2000,2.5]]}"#;

        let series: Series = serde_json::from_str(payload).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.prices[1], PricePoint::new(2000, 2.5));
    }

    #[test]
    fn min_max_spans_all_prices() {
        let series = Series::new(vec![
            PricePoint::new(1, 3.0),
            PricePoint::new(2, 1.0),
            PricePoint::new(3, 2.0),
        ]);

        assert_eq!(series.min_max(), Some((1.0, 3.0)));
        assert_eq!(Series::default().min_max(), None);
    }
}
