//! Observed closing prices and the log-return observations derived from them.

use chrono::{DateTime, Utc};

use super::error::MarketDataError;

/// One closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// Bar close time
    pub timestamp: DateTime<Utc>,
    /// Closing price
    pub close: f64,
}

/// Time-ordered closing prices for one instrument.
///
/// Construction guarantees every close is positive and finite and that
/// timestamps are strictly increasing, so `log_returns` is always finite.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use volcal_core::market_data::PriceSeries;
///
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let series = PriceSeries::from_closes(
///     vec![t0, t0 + chrono::Duration::hours(1)],
///     vec![100.0, 110.0],
/// )
/// .unwrap();
///
/// let z = series.log_returns();
/// assert_eq!(z.len(), 1);
/// assert!((z[0] - (110.0_f64 / 100.0).ln()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from price points.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, MarketDataError> {
        for (index, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(MarketDataError::InvalidPrice {
                    index,
                    value: point.close,
                });
            }
            if index > 0 && point.timestamp <= points[index - 1].timestamp {
                return Err(MarketDataError::UnorderedTimestamps { index });
            }
        }
        Ok(Self { points })
    }

    /// Build a series from parallel timestamp and close vectors.
    pub fn from_closes(
        timestamps: Vec<DateTime<Utc>>,
        closes: Vec<f64>,
    ) -> Result<Self, MarketDataError> {
        if timestamps.len() != closes.len() {
            return Err(MarketDataError::LengthMismatch {
                timestamps: timestamps.len(),
                closes: closes.len(),
            });
        }
        let points = timestamps
            .into_iter()
            .zip(closes)
            .map(|(timestamp, close)| PricePoint { timestamp, close })
            .collect();
        Self::new(points)
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Borrow the price points.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in time order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Log-price increments `z_t = ln(p_t) - ln(p_{t-1})`.
    ///
    /// Returns `len() - 1` values (empty for fewer than two prices).
    pub fn log_returns(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| w[1].close.ln() - w[0].close.ln())
            .collect()
    }

    /// Annualised realised variance `mean(z_t²) / dt`.
    ///
    /// `None` when there are fewer than two prices or `dt` is not positive.
    pub fn realized_variance(&self, dt: f64) -> Option<f64> {
        let returns = self.log_returns();
        if returns.is_empty() || dt <= 0.0 {
            return None;
        }
        let sum_sq: f64 = returns.iter().map(|z| z * z).sum();
        Some(sum_sq / returns.len() as f64 / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn hourly(n: usize) -> Vec<DateTime<Utc>> {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| t0 + Duration::hours(i as i64)).collect()
    }

    #[test]
    fn test_log_returns() {
        let series = PriceSeries::from_closes(hourly(3), vec![100.0, 105.0, 99.0]).unwrap();
        let z = series.log_returns();
        assert_eq!(z.len(), 2);
        assert_relative_eq!(z[0], (105.0_f64).ln() - (100.0_f64).ln());
        assert_relative_eq!(z[1], (99.0_f64).ln() - (105.0_f64).ln());
    }

    #[test]
    fn test_log_returns_sum_telescopes() {
        let closes = vec![100.0, 101.0, 97.5, 103.2, 102.0];
        let series = PriceSeries::from_closes(hourly(5), closes).unwrap();
        let total: f64 = series.log_returns().iter().sum();
        assert_relative_eq!(total, (102.0_f64 / 100.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_short_series() {
        let empty = PriceSeries::default();
        assert!(empty.is_empty());
        assert!(empty.log_returns().is_empty());
        assert_eq!(empty.realized_variance(1.0), None);

        let single = PriceSeries::from_closes(hourly(1), vec![100.0]).unwrap();
        assert!(single.log_returns().is_empty());
        assert_eq!(single.realized_variance(1.0 / 8760.0), None);
    }

    #[test]
    fn test_realized_variance() {
        let series = PriceSeries::from_closes(hourly(3), vec![100.0, 110.0, 100.0]).unwrap();
        let z = (1.1_f64).ln();
        let dt = 1.0 / 8760.0;
        assert_relative_eq!(
            series.realized_variance(dt).unwrap(),
            z * z / dt,
            max_relative = 1e-12
        );
        assert_eq!(series.realized_variance(0.0), None);
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = PriceSeries::from_closes(hourly(3), vec![100.0, 0.0, 101.0]).unwrap_err();
        assert_eq!(err, MarketDataError::InvalidPrice { index: 1, value: 0.0 });

        let err = PriceSeries::from_closes(hourly(2), vec![-5.0, 101.0]).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidPrice { index: 0, .. }));
    }

    #[test]
    fn test_rejects_nan_price() {
        let err = PriceSeries::from_closes(hourly(2), vec![100.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidPrice { index: 1, .. }));
    }

    #[test]
    fn test_rejects_unordered_timestamps() {
        let mut ts = hourly(3);
        ts.swap(1, 2);
        let err = PriceSeries::from_closes(ts, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, MarketDataError::UnorderedTimestamps { index: 2 });
    }

    #[test]
    fn test_rejects_duplicate_timestamps() {
        let t = hourly(1)[0];
        let err = PriceSeries::from_closes(vec![t, t], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, MarketDataError::UnorderedTimestamps { index: 1 });
    }

    #[test]
    fn test_length_mismatch() {
        let err = PriceSeries::from_closes(hourly(2), vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            MarketDataError::LengthMismatch {
                timestamps: 2,
                closes: 1
            }
        );
    }
}
