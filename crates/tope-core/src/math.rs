//! Level conversions and small numeric utilities shared by the filters.

use crate::sample::Sample;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use tope_core::db_to_linear;
///
/// assert!((db_to_linear(0.0_f32) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02_f64) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear<R: Sample>(db: R) -> R {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    (db * (R::LN_10() / R::from_f64(20.0))).exp()
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are floored at `1e-10` (−200 dB) instead of
/// producing −inf/NaN.
#[inline]
pub fn linear_to_db<R: Sample>(linear: R) -> R {
    linear.max(R::from_f64(1e-10)).ln() * (R::from_f64(20.0) / R::LN_10())
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU performance degradation on most
/// architectures. This replaces values below `1e-20` with zero, providing
/// margin before the IEEE 754 subnormal range begins. Use in exponential
/// decay paths where state can approach zero indefinitely.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal<R: Sample>(x: R) -> R {
    if x.abs() < R::from_f64(1e-20) {
        R::zero()
    } else {
        x
    }
}
