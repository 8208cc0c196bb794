//! Generic sample type for single- or double-precision processing.

use num_traits::{Float, FloatConst};

/// Floating-point sample type abstraction.
///
/// All filter state, coefficients, and time constants in this crate share
/// one sample type. The trait is implemented for `f32` and `f64`; the
/// bridging conversions exist so head indices and sample counts can be
/// derived without going through `num_traits::cast` fallibly.
///
/// Coefficient precomputation happens in `Self`, not in a fixed wider type,
/// so an `f64` pipeline keeps full precision at very long time constants
/// while an `f32` pipeline stays cheap.
pub trait Sample: Float + FloatConst + core::fmt::Debug {
    /// Convert a literal or derived `f64` into this sample type.
    fn from_f64(value: f64) -> Self;

    /// Widen this sample to `f64` (used for sample-count rounding).
    fn to_f64(self) -> f64;
}

impl Sample for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Sample for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}
