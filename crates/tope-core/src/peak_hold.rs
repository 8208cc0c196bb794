//! Cascaded peak-hold sections approximating a moving maximum.
//!
//! A single peak-hold holds a detected peak for exactly its hold window and
//! is blind to any smaller peak arriving inside that window. Splitting the
//! window across `M` series sections of `hold / M` samples each lets a
//! secondary peak that follows a fading larger one still surface at the
//! later stages, so the cascade output approximates the maximum of the
//! input over the next `hold` samples with a rising-edge-preserving
//! staircase. More sections reduce the staircase at the cost of per-sample
//! work.
//!
//! A value that exceeds every stage output propagates through the whole
//! cascade within the same sample, which is what lets a look-ahead limiter
//! see a transient a full window before it reaches the audio path.

use crate::sample::Sample;

/// `M` series peak-hold sections.
///
/// Each section re-arms on a new local maximum (`input >= held`) or when
/// its hold timer expires, and otherwise repeats its held peak. Sections
/// are chained so stage `i + 1` tracks the output of stage `i`.
///
/// # Invariants
///
/// - Stage outputs are non-negative (input is rectified on entry)
/// - `timer[i]` never exceeds the per-stage hold window between samples
///
/// # Example
///
/// ```rust
/// use tope_core::PeakHoldCascade;
///
/// let mut ph = PeakHoldCascade::<f32, 8>::new(48000.0);
/// ph.set_hold_time(0.01);
/// let envelope = ph.process(-0.5);
/// assert_eq!(envelope, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct PeakHoldCascade<R, const M: usize> {
    /// Last held peak per stage.
    output: [R; M],
    /// Samples since the last re-arm per stage.
    timer: [u32; M],
    /// Per-stage hold window in samples: `round(hold_time / M * sample_rate)`.
    hold_samples: u32,
    /// Sample rate in Hz (kept for recomputation).
    sample_rate: R,
    /// Total hold time in seconds (kept for recomputation).
    hold_time: R,
}

impl<R: Sample, const M: usize> PeakHoldCascade<R, M> {
    /// Create a cascade with a zero hold time at the given sample rate.
    pub fn new(sample_rate: R) -> Self {
        debug_assert!(M > 0, "cascade needs at least one section");
        let mut cascade = Self {
            output: [R::zero(); M],
            timer: [0; M],
            hold_samples: 0,
            sample_rate,
            hold_time: R::zero(),
        };
        cascade.recalculate_hold();
        cascade
    }

    /// Update the sample rate and recompute the per-stage hold window.
    pub fn set_sample_rate(&mut self, sample_rate: R) {
        debug_assert!(sample_rate > R::zero() && sample_rate.is_finite());
        if !(sample_rate > R::zero()) || !sample_rate.is_finite() {
            return;
        }
        self.sample_rate = sample_rate;
        self.recalculate_hold();
    }

    /// Set the total hold time in seconds (split evenly across stages).
    ///
    /// Negative values are clamped to zero; non-finite values are rejected.
    pub fn set_hold_time(&mut self, seconds: R) {
        debug_assert!(seconds >= R::zero() && seconds.is_finite());
        if !seconds.is_finite() {
            return;
        }
        self.hold_time = seconds.max(R::zero());
        self.recalculate_hold();
    }

    /// Zero all stage outputs and timers.
    pub fn reset(&mut self) {
        self.output = [R::zero(); M];
        self.timer = [0; M];
    }

    /// Feed one sample; returns the cascade envelope.
    #[inline]
    pub fn process(&mut self, input: R) -> R {
        let mut u = input.abs();
        for i in 0..M {
            let is_new_peak = u >= self.output[i];
            let is_timeout = self.timer[i] >= self.hold_samples;
            if is_new_peak || is_timeout {
                self.output[i] = u;
                self.timer[i] = 0;
            } else {
                self.timer[i] += 1;
            }
            u = self.output[i];
        }
        u
    }

    /// Run the cascade over a buffer in place.
    pub fn process_block(&mut self, buffer: &mut [R]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Per-stage hold window in samples.
    pub fn hold_samples_per_stage(&self) -> u32 {
        self.hold_samples
    }

    fn recalculate_hold(&mut self) {
        let per_stage = (self.hold_time * self.sample_rate / R::from_f64(M as f64))
            .round()
            .to_f64();
        self.hold_samples = if per_stage > 0.0 { per_stage as u32 } else { 0 };
    }
}
