//! Filter state `(variance, auxiliary)`.
//!
//! `variance` is the filtered estimate of instantaneous variance; `auxiliary`
//! carries the predicted mean of the observable log-return over the step so
//! the measurement equation can read it from the same vector.
//!
//! Predictions are allowed to produce a negative variance (the Euler step is
//! only first-order). Keeping variance non-negative is the filter loop's job;
//! [`VarianceGuard`] offers the two usual fixes.

use volcal_core::traits::Float;

/// Two-component filter state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceState<T: Float> {
    /// Instantaneous variance estimate
    pub variance: T,
    /// Log-return mean contribution over the step
    pub auxiliary: T,
}

impl<T: Float> VarianceState<T> {
    /// Number of state components.
    pub const DIMENSION: usize = 2;

    /// Create a state.
    #[inline]
    pub fn new(variance: T, auxiliary: T) -> Self {
        Self {
            variance,
            auxiliary,
        }
    }

    /// Build from `[variance, auxiliary]`.
    #[inline]
    pub fn from_array(values: [T; 2]) -> Self {
        Self::new(values[0], values[1])
    }

    /// Build from the first two elements of a slice, `None` if shorter.
    pub fn from_slice(values: &[T]) -> Option<Self> {
        match values {
            [variance, auxiliary, ..] => Some(Self::new(*variance, *auxiliary)),
            _ => None,
        }
    }

    /// `[variance, auxiliary]`.
    #[inline]
    pub fn to_array(&self) -> [T; 2] {
        [self.variance, self.auxiliary]
    }

    /// Component by index (0 = variance, 1 = auxiliary).
    pub fn get(&self, index: usize) -> Option<T> {
        match index {
            0 => Some(self.variance),
            1 => Some(self.auxiliary),
            _ => None,
        }
    }

    /// Copy with variance floored at zero.
    #[inline]
    pub fn floored(&self) -> Self {
        Self::new(self.variance.max(T::zero()), self.auxiliary)
    }

    /// Copy with variance reflected about zero.
    #[inline]
    pub fn reflected(&self) -> Self {
        Self::new(self.variance.abs(), self.auxiliary)
    }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.variance.is_finite() && self.auxiliary.is_finite()
    }
}

impl<T: Float> From<[T; 2]> for VarianceState<T> {
    fn from(values: [T; 2]) -> Self {
        Self::from_array(values)
    }
}

/// How a filter loop restores `variance >= 0` before reusing a state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VarianceGuard {
    /// `max(v, 0)`
    #[default]
    Floor,
    /// `|v|`
    Reflect,
}

impl VarianceGuard {
    /// Apply the guard to a state.
    ///
    /// ```
    /// use volcal_models::models::{VarianceGuard, VarianceState};
    ///
    /// let x = VarianceState::new(-0.01_f64, 0.002);
    /// assert_eq!(VarianceGuard::Floor.apply(&x).variance, 0.0);
    /// assert_eq!(VarianceGuard::Reflect.apply(&x).variance, 0.01);
    /// ```
    pub fn apply<T: Float>(&self, state: &VarianceState<T>) -> VarianceState<T> {
        match self {
            VarianceGuard::Floor => state.floored(),
            VarianceGuard::Reflect => state.reflected(),
        }
    }
}
