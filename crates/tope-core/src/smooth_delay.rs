//! Crossfading delay line for click-free delay-time changes.
//!
//! A fixed-capacity circular buffer with one write head and two integer
//! read taps. Changing the delay never moves an active tap: the idle tap
//! is retargeted and the output crossfades linearly between the two over a
//! configurable number of samples. The audio path therefore contains no
//! fractional resampling, so delay automation produces neither clicks nor
//! the pitch (Doppler) artefacts of an interpolated variable delay.
//!
//! # Algorithm
//!
//! Per sample, before the write head advances:
//!
//! 1. If the crossfade sits at an endpoint and the latched target differs
//!    from the delay of the *active* tap, retarget the idle tap and start
//!    fading towards it.
//! 2. Both read heads are derived as `write_ptr - delay` in wrapping `u16`
//!    arithmetic; the buffer holds exactly 2^16 samples, so incrementing
//!    heads wraps naturally modulo the capacity.
//! 3. Output is the linear blend
//!    `lower + interpolation * (upper - lower)`.
//!
//! A target set mid-transition is latched and picked up at the next
//! crossfade endpoint; the two tap delays never change while a crossfade
//! is in progress.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::sample::Sample;

/// Delay-line capacity in samples.
///
/// Heads are `u16`, so the capacity is 2^16 and head arithmetic wraps
/// without masking. Requested delays must stay below this value.
pub const CAPACITY: usize = 1 << 16;

/// Crossfading delay line with two integer read taps.
///
/// # Invariants
///
/// - `lower_delay`, `upper_delay`, `target_delay` are all `< CAPACITY`
/// - `interpolation` stays in `[0, 1]`
/// - Tap delays only change when `interpolation` sits at an endpoint
///
/// # Example
///
/// ```rust
/// use tope_core::SmoothDelay;
///
/// let mut delay = SmoothDelay::<f32>::new();
/// delay.set_delay(480);
/// delay.set_interpolation_time(480);
/// let out = delay.process(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SmoothDelay<R> {
    /// Circular sample storage, always `CAPACITY` long.
    buffer: Vec<R>,
    /// Write head; wraps modulo the capacity.
    write_ptr: u16,
    /// Delay in samples of the lower tap.
    lower_delay: u16,
    /// Delay in samples of the upper tap.
    upper_delay: u16,
    /// Latched delay request, adopted at the next crossfade endpoint.
    target_delay: u16,
    /// Crossfade position: 0 = lower tap only, 1 = upper tap only.
    interpolation: R,
    /// Per-sample crossfade increment magnitude (`1 / interpolation_time`).
    interp_step: R,
    /// Signed crossfade rate currently in effect.
    increment: R,
}

impl<R: Sample> SmoothDelay<R> {
    /// Create a delay line with both taps at zero delay.
    pub fn new() -> Self {
        Self {
            buffer: vec![R::zero(); CAPACITY],
            write_ptr: 0,
            lower_delay: 0,
            upper_delay: 0,
            target_delay: 0,
            interpolation: R::zero(),
            interp_step: R::one(),
            increment: R::zero(),
        }
    }

    /// Request a new delay in samples.
    ///
    /// The request is latched and adopted by the idle tap at the start of
    /// the next crossfade; calls made mid-transition take effect at the
    /// following endpoint. Requests at or above [`CAPACITY`] are clamped.
    pub fn set_delay(&mut self, samples: usize) {
        debug_assert!(samples < CAPACITY, "delay {samples} exceeds capacity");
        self.target_delay = samples.min(CAPACITY - 1) as u16;
    }

    /// Set the crossfade length in samples (minimum 1).
    ///
    /// Adopted at the start of the next transition; a crossfade already in
    /// progress keeps its current rate.
    pub fn set_interpolation_time(&mut self, samples: usize) {
        debug_assert!(samples >= 1, "interpolation time must be >= 1 sample");
        self.interp_step = R::one() / R::from_f64(samples.max(1) as f64);
    }

    /// Clear the buffer and return heads and crossfade state to the
    /// construction defaults. The latched target delay and the crossfade
    /// length are configuration and survive.
    pub fn reset(&mut self) {
        self.buffer.fill(R::zero());
        self.write_ptr = 0;
        self.lower_delay = 0;
        self.upper_delay = 0;
        self.interpolation = R::zero();
        self.increment = R::zero();
    }

    /// Write one sample and read the crossfaded delayed output.
    #[inline]
    pub fn process(&mut self, input: R) -> R {
        self.buffer[usize::from(self.write_ptr)] = input;

        let at_lower = self.interpolation == R::zero();
        let at_upper = self.interpolation == R::one();

        if at_upper && self.target_delay != self.upper_delay {
            // Upper tap is active; retarget the idle lower tap and fade down.
            self.lower_delay = self.target_delay;
            self.increment = -self.interp_step;
        } else if at_lower && self.target_delay != self.lower_delay {
            self.upper_delay = self.target_delay;
            self.increment = self.interp_step;
        }

        let lower_read = self.write_ptr.wrapping_sub(self.lower_delay);
        let upper_read = self.write_ptr.wrapping_sub(self.upper_delay);

        self.write_ptr = self.write_ptr.wrapping_add(1);
        self.interpolation = (self.interpolation + self.increment)
            .max(R::zero())
            .min(R::one());

        let lower = self.buffer[usize::from(lower_read)];
        let upper = self.buffer[usize::from(upper_read)];
        lower + self.interpolation * (upper - lower)
    }

    /// Process a block of samples.
    ///
    /// `input` and `output` must have the same length; `output` may alias
    /// `input` in the caller via split borrows since every index is read
    /// before it is written.
    pub fn process_block(&mut self, input: &[R], output: &mut [R]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// The currently latched delay request in samples.
    pub fn target_delay(&self) -> usize {
        usize::from(self.target_delay)
    }

    /// True while a crossfade between the two taps is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.interpolation > R::zero() && self.interpolation < R::one()
    }
}

impl<R: Sample> Default for SmoothDelay<R> {
    fn default() -> Self {
        Self::new()
    }
}
