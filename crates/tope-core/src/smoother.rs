//! Cascaded one-pole smoother with attack/release branching.
//!
//! Each stage is the familiar one-pole form
//!
//! ```text
//! y[n] = x[n] + c * (y[n-1] - x[n])
//! ```
//!
//! but the coefficient `c` is chosen per stage and per sample: the attack
//! coefficient while the stage input exceeds its state, the release
//! coefficient otherwise. That branching makes the cascade a non-linear
//! envelope follower rather than a linear low-pass, which is what keeps
//! harmonic distortion low on asymmetric programme material.
//!
//! # Time-constant correction
//!
//! Cascading `N` identical one-poles shifts the composite -3 dB point, so
//! per-stage coefficients are derived with the correction
//!
//! ```text
//! K = 1 / sqrt(2^(1/N) - 1)
//! c = exp(-2π * K * T / τ)
//! ```
//!
//! which rescales the per-stage time constant so the cascade as a whole
//! retains the configured attack and release times.

use crate::math::flush_denormal;
use crate::sample::Sample;

/// Minimum accepted time constant in seconds.
const MIN_TIME_SECONDS: f64 = 1e-6;

/// `N` series one-pole smoothers with per-stage attack/release selection.
///
/// # Invariants
///
/// - `attack_coeff` and `release_coeff` stay in `(0, 1)` for positive
///   finite time constants
/// - Each stage output moves monotonically towards its input and never
///   overshoots it
///
/// # Example
///
/// ```rust
/// use tope_core::ExpSmootherCascade;
///
/// let mut smoother = ExpSmootherCascade::<f32, 4>::new(48000.0);
/// smoother.set_attack_time(0.01);
/// smoother.set_release_time(0.05);
/// let y = smoother.process(1.0);
/// assert!(y > 0.0 && y < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExpSmootherCascade<R, const N: usize> {
    /// Last output of each stage.
    state: [R; N],
    /// Per-stage coefficient while the input exceeds the state.
    attack_coeff: R,
    /// Per-stage coefficient otherwise.
    release_coeff: R,
    /// Sample rate in Hz (kept for recomputation).
    sample_rate: R,
    /// Attack time constant in seconds.
    attack_time: R,
    /// Release time constant in seconds.
    release_time: R,
}

impl<R: Sample, const N: usize> ExpSmootherCascade<R, N> {
    /// Create a cascade with 10 ms attack and 50 ms release.
    pub fn new(sample_rate: R) -> Self {
        debug_assert!(N > 0, "cascade needs at least one stage");
        let mut smoother = Self {
            state: [R::zero(); N],
            attack_coeff: R::zero(),
            release_coeff: R::zero(),
            sample_rate,
            attack_time: R::from_f64(0.01),
            release_time: R::from_f64(0.05),
        };
        smoother.recalculate_coefficients();
        smoother
    }

    /// Update the sample rate and recompute both coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: R) {
        debug_assert!(sample_rate > R::zero() && sample_rate.is_finite());
        if !(sample_rate > R::zero()) || !sample_rate.is_finite() {
            return;
        }
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Set the attack time constant in seconds (must be positive).
    pub fn set_attack_time(&mut self, seconds: R) {
        debug_assert!(seconds > R::zero() && seconds.is_finite());
        if !seconds.is_finite() {
            return;
        }
        self.attack_time = seconds.max(R::from_f64(MIN_TIME_SECONDS));
        self.recalculate_coefficients();
    }

    /// Set the release time constant in seconds (must be positive).
    pub fn set_release_time(&mut self, seconds: R) {
        debug_assert!(seconds > R::zero() && seconds.is_finite());
        if !seconds.is_finite() {
            return;
        }
        self.release_time = seconds.max(R::from_f64(MIN_TIME_SECONDS));
        self.recalculate_coefficients();
    }

    /// Zero the state of every stage.
    pub fn reset(&mut self) {
        self.state = [R::zero(); N];
    }

    /// Feed one sample; returns the cascaded smoothed output.
    #[inline]
    pub fn process(&mut self, input: R) -> R {
        let mut u = input;
        for state in self.state.iter_mut() {
            let c = if u > *state {
                self.attack_coeff
            } else {
                self.release_coeff
            };
            *state = flush_denormal(u + c * (*state - u));
            u = *state;
        }
        u
    }

    /// Run the cascade over a buffer in place.
    pub fn process_block(&mut self, buffer: &mut [R]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Stage-count correction `K = 1 / sqrt(2^(1/N) - 1)`.
    ///
    /// Derived from the composite magnitude response of `N` identical
    /// one-poles; rescales the per-stage time constant so the cascade's
    /// -3 dB rise/fall time matches the configured value.
    fn correction() -> R {
        let n = R::from_f64(N as f64);
        R::one() / (R::from_f64(2.0).powf(R::one() / n) - R::one()).sqrt()
    }

    fn coefficient(&self, tau: R) -> R {
        (-R::TAU() * Self::correction() / (self.sample_rate * tau)).exp()
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = self.coefficient(self.attack_time);
        self.release_coeff = self.coefficient(self.release_time);
    }
}
