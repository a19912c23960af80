//! Sampling frequencies and the annualised discretisation step.
//!
//! Model rates (`kappa`, `theta`, `sigma`) are quoted per year, so a price
//! series sampled at a given bar size is paired with `dt` expressed as a
//! fraction of a 365-day, 24-hour year. An hourly bar therefore has
//! `dt = 1 / 8760`.

use std::fmt;
use std::str::FromStr;

use super::error::ModelError;
use crate::traits::{constant, to_f64, Float};

/// Minutes in a 365-day year.
pub const MINUTES_PER_YEAR: f64 = 525_600.0;

/// Bar size of an observed price series.
///
/// # Examples
///
/// ```
/// use volcal_core::types::SamplingFrequency;
///
/// let freq: SamplingFrequency = "1hour".parse().unwrap();
/// assert_eq!(freq, SamplingFrequency::OneHour);
/// assert_eq!(freq.minutes(), 60);
/// assert_eq!(freq.label(), "1hour");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplingFrequency {
    /// One-minute bars.
    #[cfg_attr(feature = "serde", serde(rename = "1min"))]
    OneMinute,
    /// Five-minute bars.
    #[cfg_attr(feature = "serde", serde(rename = "5min"))]
    FiveMinutes,
    /// Fifteen-minute bars.
    #[cfg_attr(feature = "serde", serde(rename = "15min"))]
    FifteenMinutes,
    /// Thirty-minute bars.
    #[cfg_attr(feature = "serde", serde(rename = "30min"))]
    ThirtyMinutes,
    /// Hourly bars (default).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "1hour"))]
    OneHour,
    /// Four-hour bars.
    #[cfg_attr(feature = "serde", serde(rename = "4hour"))]
    FourHours,
    /// Daily bars.
    #[cfg_attr(feature = "serde", serde(rename = "1day"))]
    OneDay,
    /// Weekly bars.
    #[cfg_attr(feature = "serde", serde(rename = "1week"))]
    OneWeek,
}

impl SamplingFrequency {
    /// All supported frequencies, shortest first.
    pub const ALL: [SamplingFrequency; 8] = [
        SamplingFrequency::OneMinute,
        SamplingFrequency::FiveMinutes,
        SamplingFrequency::FifteenMinutes,
        SamplingFrequency::ThirtyMinutes,
        SamplingFrequency::OneHour,
        SamplingFrequency::FourHours,
        SamplingFrequency::OneDay,
        SamplingFrequency::OneWeek,
    ];

    /// Bar length in minutes.
    #[inline]
    pub fn minutes(&self) -> u32 {
        match self {
            SamplingFrequency::OneMinute => 1,
            SamplingFrequency::FiveMinutes => 5,
            SamplingFrequency::FifteenMinutes => 15,
            SamplingFrequency::ThirtyMinutes => 30,
            SamplingFrequency::OneHour => 60,
            SamplingFrequency::FourHours => 240,
            SamplingFrequency::OneDay => 1_440,
            SamplingFrequency::OneWeek => 10_080,
        }
    }

    /// Canonical label, as accepted by [`FromStr`].
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            SamplingFrequency::OneMinute => "1min",
            SamplingFrequency::FiveMinutes => "5min",
            SamplingFrequency::FifteenMinutes => "15min",
            SamplingFrequency::ThirtyMinutes => "30min",
            SamplingFrequency::OneHour => "1hour",
            SamplingFrequency::FourHours => "4hour",
            SamplingFrequency::OneDay => "1day",
            SamplingFrequency::OneWeek => "1week",
        }
    }

    /// Bar length as a fraction of a year.
    ///
    /// ```
    /// use volcal_core::types::SamplingFrequency;
    ///
    /// assert_eq!(SamplingFrequency::OneHour.annualized_dt(), 1.0 / 8760.0);
    /// assert_eq!(SamplingFrequency::OneDay.annualized_dt(), 1.0 / 365.0);
    /// ```
    #[inline]
    pub fn annualized_dt(&self) -> f64 {
        f64::from(self.minutes()) / MINUTES_PER_YEAR
    }

    /// Number of bars per year.
    #[inline]
    pub fn periods_per_year(&self) -> f64 {
        MINUTES_PER_YEAR / f64::from(self.minutes())
    }
}

impl fmt::Display for SamplingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SamplingFrequency {
    type Err = ModelError;

    /// Parse a frequency label (case-insensitive).
    ///
    /// Accepted aliases: `1m`, `1h`/`hourly`, `4h`, `1d`/`daily`, `1w`/`weekly`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1min" | "1m" => Ok(SamplingFrequency::OneMinute),
            "5min" | "5m" => Ok(SamplingFrequency::FiveMinutes),
            "15min" | "15m" => Ok(SamplingFrequency::FifteenMinutes),
            "30min" | "30m" => Ok(SamplingFrequency::ThirtyMinutes),
            "1hour" | "1h" | "hourly" => Ok(SamplingFrequency::OneHour),
            "4hour" | "4h" => Ok(SamplingFrequency::FourHours),
            "1day" | "1d" | "daily" => Ok(SamplingFrequency::OneDay),
            "1week" | "1w" | "weekly" => Ok(SamplingFrequency::OneWeek),
            _ => Err(ModelError::UnknownFrequency(s.to_string())),
        }
    }
}

/// Discretisation interval `dt > 0`, fixed for the lifetime of a model.
///
/// # Examples
///
/// ```
/// use volcal_core::types::{ModelError, TimeStep};
///
/// let dt = TimeStep::new(1.0_f64 / 8760.0).unwrap();
/// assert!(dt.value() > 0.0);
///
/// assert_eq!(TimeStep::new(0.0_f64), Err(ModelError::InvalidTimeStep(0.0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeStep<T: Float> {
    dt: T,
}

impl<T: Float> TimeStep<T> {
    /// Create a time step, rejecting `dt <= 0` and non-finite values.
    pub fn new(dt: T) -> Result<Self, ModelError> {
        if !dt.is_finite() || dt <= T::zero() {
            return Err(ModelError::InvalidTimeStep(to_f64(dt)));
        }
        Ok(Self { dt })
    }

    /// Annualised time step of a sampling frequency.
    pub fn from_frequency(frequency: SamplingFrequency) -> Self {
        Self {
            dt: constant(frequency.annualized_dt()),
        }
    }

    /// Parse a frequency label and return its annualised time step.
    pub fn from_label(label: &str) -> Result<Self, ModelError> {
        label.parse::<SamplingFrequency>().map(Self::from_frequency)
    }

    /// The raw `dt`.
    #[inline]
    pub fn value(&self) -> T {
        self.dt
    }
}
