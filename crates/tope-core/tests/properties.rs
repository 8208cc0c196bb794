//! Property-based tests for the envelope-shaping primitives.

use proptest::prelude::*;
use tope_core::{ExpSmootherCascade, PeakHoldCascade, SmoothDelay};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// After a crossfade settles, an impulse comes back after exactly the
    /// requested number of samples, unscaled.
    #[test]
    fn delay_reproduces_impulse_exactly(delay_samples in 1usize..4096) {
        let mut delay = SmoothDelay::<f32>::new();
        delay.set_delay(delay_samples);
        delay.set_interpolation_time(64);
        for _ in 0..(delay_samples + 128) {
            delay.process(0.0);
        }

        let mut outputs = Vec::with_capacity(delay_samples + 1);
        outputs.push(delay.process(1.0));
        for _ in 0..delay_samples {
            outputs.push(delay.process(0.0));
        }
        prop_assert_eq!(outputs[delay_samples], 1.0);
        for (n, &y) in outputs[..delay_samples].iter().enumerate() {
            prop_assert_eq!(y, 0.0, "leakage at {}", n);
        }
    }

    /// The crossfaded output is a convex blend of two buffer reads, so it
    /// can never exceed the input peak, even across delay retargets.
    #[test]
    fn delay_output_bounded_by_input_peak(
        first in 0usize..2048,
        second in 0usize..2048,
        interp in 1usize..512,
        seed in any::<u32>(),
    ) {
        let mut delay = SmoothDelay::<f32>::new();
        delay.set_delay(first);
        delay.set_interpolation_time(interp);

        let mut state = if seed == 0 { 1 } else { seed };
        let mut peak_in = 0.0_f32;
        for n in 0..6000 {
            if n == 3000 {
                delay.set_delay(second);
            }
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let x = (state as i32 as f32) / (i32::MAX as f32);
            peak_in = peak_in.max(x.abs());
            let y = delay.process(x);
            prop_assert!(y.abs() <= peak_in * (1.0 + 1e-6), "output {} above input peak {}", y, peak_in);
        }
    }

    /// The cascade envelope dominates the rectified input at every sample:
    /// a stage either re-arms on the new value or holds something larger.
    #[test]
    fn peak_hold_envelope_dominates_input(
        hold_ms in 0.0f64..20.0,
        seed in any::<u32>(),
    ) {
        let mut cascade = PeakHoldCascade::<f32, 8>::new(48000.0);
        cascade.set_hold_time(hold_ms as f32 / 1000.0);

        let mut state = if seed == 0 { 1 } else { seed };
        for n in 0..4096 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let x = (state as i32 as f32) / (i32::MAX as f32);
            let y = cascade.process(x);
            prop_assert!(y >= x.abs(), "envelope {} below input {} at {}", y, x.abs(), n);
        }
    }

    /// Every smoother stage moves towards its input without overshoot, so
    /// the cascade output stays inside the hull of the input history.
    #[test]
    fn smoother_output_stays_in_input_hull(
        attack_ms in 0.5f64..50.0,
        release_ms in 0.5f64..200.0,
        seed in any::<u32>(),
    ) {
        let mut smoother = ExpSmootherCascade::<f64, 4>::new(48000.0);
        smoother.set_attack_time(attack_ms / 1000.0);
        smoother.set_release_time(release_ms / 1000.0);

        let mut state = if seed == 0 { 1 } else { seed };
        let mut lo = 0.0_f64; // initial stage state
        let mut hi = 0.0_f64;
        for _ in 0..4096 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let x = f64::from(state as i32) / f64::from(i32::MAX);
            lo = lo.min(x);
            hi = hi.max(x);
            let y = smoother.process(x);
            prop_assert!(y >= lo - 1e-12 && y <= hi + 1e-12, "output {} outside [{}, {}]", y, lo, hi);
        }
    }
}
