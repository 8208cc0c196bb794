//! Brickwall look-ahead limiter with cascaded envelope shaping.
//!
//! A true peak limiter for the final stage of a signal path: output
//! magnitude never exceeds the configured ceiling at steady state, while
//! the cascaded peak-hold and smoother keep gain modulation slow enough to
//! avoid audible distortion, and the crossfading delay line keeps attack
//! automation free of clicks and pitch artefacts.
//!
//! # Algorithm
//!
//! Per sample:
//!
//! 1. **Pre-gain**: the linear pre-gain target is tracked by a 20 Hz
//!    one-pole so automation cannot zipper; both channels are scaled.
//! 2. **Side-chain**: the channels are linked through `max(|L|, |R|)` so a
//!    transient on either side attenuates both identically and the stereo
//!    image cannot shift.
//! 3. **Peak-hold**: the mono side-chain runs through the
//!    [`PeakHoldCascade`]; a rising peak surfaces immediately and is held
//!    for the attack-plus-hold window.
//! 4. **Clip at threshold**: the held envelope is floored at the smoothed
//!    threshold, so the attenuation computed later can never amplify.
//! 5. **Smoothing**: the [`ExpSmootherCascade`] branches between attack
//!    and release per stage and per sample.
//! 6. **Attenuation**: `g = threshold / envelope`, clamped at unity.
//! 7. **Look-ahead**: each channel's raw (pre-gained) audio is delayed by
//!    the look-ahead through its own [`SmoothDelay`], then multiplied by
//!    `g`.
//!
//! The look-ahead is quantised to a multiple of the peak-hold stage count
//! so the hold window and the delay stay exactly aligned; a peak is always
//! known to the gain path by the time the audio it belongs to leaves the
//! delay line.
//!
//! # Parameters
//!
//! | Parameter | Unit | Default | Description |
//! |-----------|------|---------|-------------|
//! | Pre-gain | dB | 0.0 | Input drive; high values turn the limiter into a loudness maximiser |
//! | Attack | s | 0.01 | Look-ahead window and envelope rise time |
//! | Hold | s | 0.0 | Extra peak-hold beyond the attack window |
//! | Release | s | 0.05 | Envelope fall time |
//! | Threshold | dB | -0.3 | Output ceiling |
//!
//! # References
//!
//! - Giannoulis, Massberg & Reiss, "Digital Dynamic Range Compressor
//!   Design — A Tutorial and Analysis", JAES vol. 60 no. 6, 2012.
//! - Zölzer, "DAFX: Digital Audio Effects" (2nd ed.), Ch. 4 — limiter
//!   topology with look-ahead delay.

use tope_core::{
    ExpSmootherCascade, PeakHoldCascade, Sample, SmoothDelay, db_to_linear, flush_denormal,
    smooth_delay,
};

/// Number of series peak-hold sections.
///
/// The look-ahead is quantised to a multiple of this count so the hold
/// window and the delay line stay sample-aligned.
pub const PEAK_HOLD_STAGES: usize = 8;

/// Number of cascaded one-pole smoother stages.
pub const SMOOTHER_STAGES: usize = 4;

/// One-pole cutoff for pre-gain and threshold automation smoothing.
const PARAM_SMOOTHING_HZ: f64 = 20.0;

/// Minimum accepted time constant in seconds.
const MIN_TIME_SECONDS: f64 = 1e-6;

/// Stereo look-ahead peak limiter.
///
/// One instance processes exactly one stereo stream; it is not safe for
/// concurrent invocation, and multiple streams need one instance each.
/// The `process` path performs no allocation and no branching whose cost
/// depends on sample magnitude.
///
/// # Example
///
/// ```rust
/// use tope_dynamics::Limiter;
///
/// let mut limiter = Limiter::<f32>::with_config(
///     48000.0, // sample rate
///     30.0,    // pre-gain dB
///     0.01,    // attack s
///     0.0,     // hold s
///     0.05,    // release s
///     -0.3,    // threshold dB
/// );
/// assert_eq!(limiter.latency_samples(), limiter.lookahead_samples());
/// ```
#[derive(Debug, Clone)]
pub struct Limiter<R> {
    /// Audio sample rate in Hz.
    sample_rate: R,

    /// Pre-gain target in dB.
    pre_gain_db: R,

    /// Ceiling in dB.
    threshold_db: R,

    /// Attack time in seconds; also determines the look-ahead.
    attack_time: R,

    /// Extra hold time in seconds on top of the attack window.
    hold_time: R,

    /// Release time in seconds.
    release_time: R,

    /// Current look-ahead in samples, always a multiple of
    /// [`PEAK_HOLD_STAGES`].
    lookahead_samples: usize,

    /// Look-ahead delay, left channel.
    delay_left: SmoothDelay<R>,

    /// Look-ahead delay, right channel.
    delay_right: SmoothDelay<R>,

    /// Shared mono peak-hold cascade.
    peak_hold: PeakHoldCascade<R, PEAK_HOLD_STAGES>,

    /// Shared attack/release envelope smoother.
    smoother: ExpSmootherCascade<R, SMOOTHER_STAGES>,

    /// 20 Hz one-pole state tracking the linear pre-gain.
    smoothed_pre_gain: R,

    /// 20 Hz one-pole state tracking the linear threshold.
    smoothed_threshold: R,

    /// Coefficient of the two parameter smoothers: `exp(-2π·20/sr)`.
    param_coeff: R,

    /// Most recent attenuation gain (1.0 = no reduction), for metering.
    gain_reduction: R,
}

impl<R: Sample> Limiter<R> {
    /// Create a limiter with the default configuration at the given
    /// sample rate.
    ///
    /// Defaults: pre-gain 0 dB, attack 10 ms, hold 0 ms, release 50 ms,
    /// threshold −0.3 dB.
    pub fn new(sample_rate: R) -> Self {
        Self::with_config(
            sample_rate,
            R::zero(),
            R::from_f64(0.01),
            R::zero(),
            R::from_f64(0.05),
            R::from_f64(-0.3),
        )
    }

    /// Create a limiter with an explicit configuration.
    pub fn with_config(
        sample_rate: R,
        pre_gain_db: R,
        attack_time: R,
        hold_time: R,
        release_time: R,
        threshold_db: R,
    ) -> Self {
        debug_assert!(sample_rate > R::zero() && sample_rate.is_finite());
        let sample_rate = if sample_rate > R::zero() && sample_rate.is_finite() {
            sample_rate
        } else {
            R::from_f64(48000.0)
        };

        let mut limiter = Self {
            sample_rate,
            pre_gain_db: R::zero(),
            threshold_db: R::zero(),
            attack_time: R::from_f64(0.01),
            hold_time: R::zero(),
            release_time: R::from_f64(0.05),
            lookahead_samples: 0,
            delay_left: SmoothDelay::new(),
            delay_right: SmoothDelay::new(),
            peak_hold: PeakHoldCascade::new(sample_rate),
            smoother: ExpSmootherCascade::new(sample_rate),
            smoothed_pre_gain: R::zero(),
            smoothed_threshold: R::zero(),
            param_coeff: R::zero(),
            gain_reduction: R::one(),
        };
        limiter.param_coeff = Self::param_smoothing_coeff(sample_rate);
        limiter.set_pre_gain(pre_gain_db);
        limiter.set_threshold(threshold_db);
        limiter.set_release_time(release_time);
        limiter.set_hold_time(hold_time);
        limiter.set_attack_time(attack_time);
        limiter
    }

    /// Update the sample rate and rebuild every rate-dependent quantity.
    ///
    /// Must be called before `process` when the stream rate differs from
    /// the construction rate. State is preserved.
    pub fn set_sample_rate(&mut self, sample_rate: R) {
        debug_assert!(sample_rate > R::zero() && sample_rate.is_finite());
        if !(sample_rate > R::zero()) || !sample_rate.is_finite() {
            return;
        }
        self.sample_rate = sample_rate;
        self.param_coeff = Self::param_smoothing_coeff(sample_rate);
        self.peak_hold.set_sample_rate(sample_rate);
        self.smoother.set_sample_rate(sample_rate);
        self.refresh_lookahead();
    }

    /// Set the attack time in seconds (must be positive).
    ///
    /// Recomputes the look-ahead, retargets both delay lines (the change
    /// crossfades over one look-ahead window), extends the peak-hold to
    /// `attack + hold`, and sets the smoother attack.
    pub fn set_attack_time(&mut self, seconds: R) {
        debug_assert!(seconds > R::zero() && seconds.is_finite());
        if !seconds.is_finite() {
            return;
        }
        self.attack_time = seconds.max(R::from_f64(MIN_TIME_SECONDS));
        self.refresh_lookahead();
        self.peak_hold.set_hold_time(self.attack_time + self.hold_time);
        self.smoother.set_attack_time(self.attack_time);
    }

    /// Set the extra hold time in seconds (non-negative).
    pub fn set_hold_time(&mut self, seconds: R) {
        debug_assert!(seconds >= R::zero() && seconds.is_finite());
        if !seconds.is_finite() {
            return;
        }
        self.hold_time = seconds.max(R::zero());
        self.peak_hold.set_hold_time(self.attack_time + self.hold_time);
    }

    /// Set the release time in seconds (must be positive).
    pub fn set_release_time(&mut self, seconds: R) {
        debug_assert!(seconds > R::zero() && seconds.is_finite());
        if !seconds.is_finite() {
            return;
        }
        self.release_time = seconds.max(R::from_f64(MIN_TIME_SECONDS));
        self.smoother.set_release_time(self.release_time);
    }

    /// Set the output ceiling in dB (finite).
    pub fn set_threshold(&mut self, db: R) {
        debug_assert!(db.is_finite());
        if !db.is_finite() {
            return;
        }
        self.threshold_db = db;
    }

    /// Set the input pre-gain in dB (finite).
    pub fn set_pre_gain(&mut self, db: R) {
        debug_assert!(db.is_finite());
        if !db.is_finite() {
            return;
        }
        self.pre_gain_db = db;
    }

    /// Zero all state: delay lines, peak-hold, smoother, and the two
    /// parameter smoothers. Configuration is untouched.
    pub fn reset(&mut self) {
        self.delay_left.reset();
        self.delay_right.reset();
        self.peak_hold.reset();
        self.smoother.reset();
        self.smoothed_pre_gain = R::zero();
        self.smoothed_threshold = R::zero();
        self.gain_reduction = R::one();
    }

    /// Process one stereo sample pair.
    #[inline]
    pub fn process_sample(&mut self, left: R, right: R) -> (R, R) {
        let pre_gain = db_to_linear(self.pre_gain_db);
        let threshold = db_to_linear(self.threshold_db);
        self.step(left, right, pre_gain, threshold)
    }

    /// Process a block: two input slices in, two output slices out.
    ///
    /// All four slices must have the same length. For in-place operation
    /// on existing buffers use [`process_in_place`](Self::process_in_place).
    pub fn process(
        &mut self,
        input_left: &[R],
        input_right: &[R],
        output_left: &mut [R],
        output_right: &mut [R],
    ) {
        debug_assert_eq!(input_left.len(), input_right.len());
        debug_assert_eq!(input_left.len(), output_left.len());
        debug_assert_eq!(input_left.len(), output_right.len());

        let pre_gain = db_to_linear(self.pre_gain_db);
        let threshold = db_to_linear(self.threshold_db);

        for n in 0..input_left
            .len()
            .min(input_right.len())
            .min(output_left.len())
            .min(output_right.len())
        {
            let (l, r) = self.step(input_left[n], input_right[n], pre_gain, threshold);
            output_left[n] = l;
            output_right[n] = r;
        }
    }

    /// Process two channel buffers in place.
    pub fn process_in_place(&mut self, left: &mut [R], right: &mut [R]) {
        debug_assert_eq!(left.len(), right.len());

        let pre_gain = db_to_linear(self.pre_gain_db);
        let threshold = db_to_linear(self.threshold_db);

        for n in 0..left.len().min(right.len()) {
            let (l, r) = self.step(left[n], right[n], pre_gain, threshold);
            left[n] = l;
            right[n] = r;
        }
    }

    /// Look-ahead in samples, always a multiple of [`PEAK_HOLD_STAGES`].
    pub fn lookahead_samples(&self) -> usize {
        self.lookahead_samples
    }

    /// Reported latency equals the current look-ahead.
    pub fn latency_samples(&self) -> usize {
        self.lookahead_samples
    }

    /// Most recent attenuation gain in `(0, 1]` (1.0 = no reduction).
    pub fn gain_reduction(&self) -> R {
        self.gain_reduction
    }

    /// Configured sample rate in Hz.
    pub fn sample_rate(&self) -> R {
        self.sample_rate
    }

    /// Configured pre-gain in dB.
    pub fn pre_gain_db(&self) -> R {
        self.pre_gain_db
    }

    /// Configured threshold in dB.
    pub fn threshold_db(&self) -> R {
        self.threshold_db
    }

    /// Configured attack time in seconds.
    pub fn attack_time(&self) -> R {
        self.attack_time
    }

    /// Configured hold time in seconds.
    pub fn hold_time(&self) -> R {
        self.hold_time
    }

    /// Configured release time in seconds.
    pub fn release_time(&self) -> R {
        self.release_time
    }

    /// The complete per-sample chain; `pre_gain` and `threshold` are the
    /// linear targets derived once per block.
    #[inline]
    fn step(&mut self, left: R, right: R, pre_gain: R, threshold: R) -> (R, R) {
        self.smoothed_pre_gain =
            flush_denormal(pre_gain + self.param_coeff * (self.smoothed_pre_gain - pre_gain));
        let left = left * self.smoothed_pre_gain;
        let right = right * self.smoothed_pre_gain;

        self.smoothed_threshold =
            flush_denormal(threshold + self.param_coeff * (self.smoothed_threshold - threshold));
        let ceiling = self.smoothed_threshold;

        let peak = self.peak_hold.process(left.abs().max(right.abs()));
        let envelope = self.smoother.process(peak.max(ceiling));

        // The clip above guarantees envelope >= ceiling once the smoother
        // has caught up; the clamp covers the ramp-in right after reset.
        let gain = (ceiling / envelope).min(R::one());
        self.gain_reduction = gain;

        (
            gain * self.delay_left.process(left),
            gain * self.delay_right.process(right),
        )
    }

    /// Quantise the attack window to a whole number of samples per
    /// peak-hold stage and push the result into both delay lines.
    fn refresh_lookahead(&mut self) {
        let stages = PEAK_HOLD_STAGES;
        let per_stage = (self.attack_time * self.sample_rate / R::from_f64(stages as f64))
            .round()
            .to_f64();
        let per_stage = if per_stage > 0.0 { per_stage as usize } else { 0 };
        // Keep the delay request below the line's capacity while staying a
        // multiple of the stage count.
        let per_stage = per_stage.min((smooth_delay::CAPACITY - 1) / stages);
        self.lookahead_samples = per_stage * stages;

        for delay in [&mut self.delay_left, &mut self.delay_right] {
            delay.set_delay(self.lookahead_samples);
            delay.set_interpolation_time(self.lookahead_samples.max(1));
        }
    }

    fn param_smoothing_coeff(sample_rate: R) -> R {
        (-R::TAU() * R::from_f64(PARAM_SMOOTHING_HZ) / sample_rate).exp()
    }
}

impl<R: Sample> Default for Limiter<R> {
    /// Default configuration at 48 kHz.
    fn default() -> Self {
        Self::new(R::from_f64(48000.0))
    }
}
