//! Core numeric traits.
//!
//! Models, states and matrices are generic over [`Float`] so that the same
//! code evaluates with `f64`, `f32`, or any automatic-differentiation scalar
//! implementing `num_traits::Float`.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use volcal_core::traits::Float;
///
/// fn mean_reversion_step<T: Float>(v: T, kappa: T, theta: T, dt: T) -> T {
///     v + kappa * (theta - v) * dt
/// }
///
/// let next: f64 = mean_reversion_step(0.04, 2.0, 0.09, 0.5);
/// assert!((next - 0.09).abs() < 1e-12);
/// ```
pub use num_traits::Float;

/// Convert an `f64` literal into `T`.
///
/// Every `Float` type can represent the small constants used by the models
/// (`0.5`, `2.0`), so the fallback is never reached in practice.
#[inline]
pub fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Convert `T` into `f64` for error reporting.
#[inline]
pub fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
