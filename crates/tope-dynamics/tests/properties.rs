//! Property-based tests for the limiter.
//!
//! Uses proptest to verify the fundamental invariants across random
//! configurations and programme material: finite output, no amplification,
//! ceiling compliance on sustained signals, and clean reset.

use proptest::prelude::*;
use tope_core::db_to_linear;
use tope_dynamics::Limiter;

const SR: f32 = 48000.0;

fn noise(len: usize, amplitude: f32, mut seed: u32) -> Vec<f32> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed as i32 as f32) / (i32::MAX as f32) * amplitude
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Finite input and any valid configuration must give finite output.
    #[test]
    fn output_is_finite(
        pre_gain_db in -24.0_f32..=60.0,
        attack in 0.0005_f32..=0.05,
        hold in 0.0_f32..=0.02,
        release in 0.005_f32..=0.5,
        threshold_db in -24.0_f32..=0.0,
        amplitude in 0.0_f32..=2.0,
        seed in any::<u32>(),
    ) {
        let mut limiter =
            Limiter::<f32>::with_config(SR, pre_gain_db, attack, hold, release, threshold_db);
        let left = noise(4096, amplitude, seed);
        let right = noise(4096, amplitude, seed.wrapping_add(1));
        let mut out_l = vec![0.0; left.len()];
        let mut out_r = vec![0.0; right.len()];
        limiter.process(&left, &right, &mut out_l, &mut out_r);

        for n in 0..out_l.len() {
            prop_assert!(out_l[n].is_finite() && out_r[n].is_finite(),
                "non-finite output at {n}");
        }
    }

    /// With no pre-gain the limiter can only attenuate: peak out <= peak in.
    #[test]
    fn never_amplifies_at_unity_pre_gain(
        attack in 0.001_f32..=0.02,
        release in 0.01_f32..=0.2,
        threshold_db in -12.0_f32..=0.0,
        amplitude in 0.01_f32..=2.0,
        seed in any::<u32>(),
    ) {
        let mut limiter =
            Limiter::<f32>::with_config(SR, 0.0, attack, 0.0, release, threshold_db);
        let input = noise(16384, amplitude, seed);
        let mut out_l = vec![0.0; input.len()];
        let mut out_r = vec![0.0; input.len()];
        limiter.process(&input, &input, &mut out_l, &mut out_r);

        let peak_in = input.iter().fold(0.0_f32, |m, &x| m.max(x.abs()));
        let peak_out = out_l.iter().fold(0.0_f32, |m, &y| m.max(y.abs()));
        prop_assert!(
            peak_out <= peak_in * (1.0 + 1e-5),
            "amplified: in {peak_in}, out {peak_out}"
        );
    }

    /// A sustained over-threshold signal settles at (or below) the ceiling.
    #[test]
    fn sustained_signal_respects_ceiling(
        level in 0.1_f32..=4.0,
        threshold_db in -12.0_f32..=-0.1,
        attack in 0.002_f32..=0.02,
        release in 0.02_f32..=0.2,
    ) {
        let mut limiter =
            Limiter::<f32>::with_config(SR, 0.0, attack, 0.0, release, threshold_db);
        let ceiling = db_to_linear(threshold_db);
        let input = vec![level; 48000];
        let mut out_l = vec![0.0; input.len()];
        let mut out_r = vec![0.0; input.len()];
        limiter.process(&input, &input, &mut out_l, &mut out_r);

        for n in 24000..out_l.len() {
            prop_assert!(
                out_l[n].abs() <= ceiling * (1.0 + 1e-3),
                "sample {n} = {} above ceiling {ceiling}",
                out_l[n]
            );
        }
    }

    /// Processing, resetting, and processing again equals a fresh run.
    #[test]
    fn reset_equals_fresh_instance(
        pre_gain_db in 0.0_f32..=40.0,
        seed in any::<u32>(),
    ) {
        let make = || Limiter::<f32>::with_config(SR, pre_gain_db, 0.005, 0.0, 0.05, -0.3);
        let input = noise(4096, 1.0, seed);

        let mut reused = make();
        let mut scratch_l = vec![0.0; input.len()];
        let mut scratch_r = vec![0.0; input.len()];
        reused.process(&input, &input, &mut scratch_l, &mut scratch_r);
        reused.reset();

        let mut out_reused_l = vec![0.0; input.len()];
        let mut out_reused_r = vec![0.0; input.len()];
        reused.process(&input, &input, &mut out_reused_l, &mut out_reused_r);

        let mut fresh = make();
        let mut out_fresh_l = vec![0.0; input.len()];
        let mut out_fresh_r = vec![0.0; input.len()];
        fresh.process(&input, &input, &mut out_fresh_l, &mut out_fresh_r);

        prop_assert_eq!(out_reused_l, out_fresh_l);
        prop_assert_eq!(out_reused_r, out_fresh_r);
    }
}
