//! Block-processing speed measurement.
//!
//! Feeds seeded noise through the limiter block by block and reports the
//! mean per-block time in microseconds, its relative standard deviation,
//! and the resulting realtime factor.

use crate::preset::LimiterPreset;
use crate::signal::Noise;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tope_core::Sample;

/// Arguments for `tope timing`.
#[derive(Args)]
pub struct TimingArgs {
    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Number of measured blocks
    #[arg(long, default_value = "2000")]
    blocks: usize,

    /// Sample rate used for coefficient derivation
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Measure the double-precision pipeline
    #[arg(long)]
    double: bool,

    /// Preset TOML file (defaults apply otherwise)
    #[arg(short, long)]
    preset: Option<PathBuf>,
}

/// Execute `tope timing`.
pub fn run(args: TimingArgs) -> anyhow::Result<()> {
    let preset = match &args.preset {
        Some(path) => LimiterPreset::load(path)?,
        None => LimiterPreset::default(),
    };
    preset.validate()?;

    let block_size = args.block_size.max(1);
    let blocks = args.blocks.max(1);
    let report = if args.double {
        measure::<f64>(&preset, &args, block_size, blocks)
    } else {
        measure::<f32>(&preset, &args, block_size, blocks)
    };

    let block_seconds = block_size as f64 / f64::from(args.sample_rate);
    println!(
        "precision: {}",
        if args.double { "f64" } else { "f32" }
    );
    println!("block size: {block_size} frames, {blocks} blocks measured");
    println!("mean: {:.2} us/block", report.mean_us);
    println!("rsd:  {:.2} %", report.rsd_percent);
    println!(
        "realtime factor: {:.1}x",
        block_seconds / (report.mean_us * 1e-6)
    );
    Ok(())
}

struct TimingReport {
    mean_us: f64,
    rsd_percent: f64,
}

fn measure<R: Sample>(
    preset: &LimiterPreset,
    args: &TimingArgs,
    block_size: usize,
    blocks: usize,
) -> TimingReport {
    let mut limiter = preset.build_limiter::<R>(f64::from(args.sample_rate));

    let mut noise = Noise::new(0xACE1);
    let input_l: Vec<R> = (0..block_size)
        .map(|_| R::from_f64(f64::from(noise.next_sample())))
        .collect();
    let input_r: Vec<R> = (0..block_size)
        .map(|_| R::from_f64(f64::from(noise.next_sample())))
        .collect();
    let mut out_l = vec![R::zero(); block_size];
    let mut out_r = vec![R::zero(); block_size];

    // Warm-up: fill the look-ahead and let caches settle.
    for _ in 0..64 {
        limiter.process(&input_l, &input_r, &mut out_l, &mut out_r);
    }

    let mut times_us = Vec::with_capacity(blocks);
    for _ in 0..blocks {
        let start = Instant::now();
        limiter.process(&input_l, &input_r, &mut out_l, &mut out_r);
        times_us.push(start.elapsed().as_secs_f64() * 1e6);
    }

    let mean = times_us.iter().sum::<f64>() / times_us.len() as f64;
    let variance = times_us
        .iter()
        .map(|t| (t - mean) * (t - mean))
        .sum::<f64>()
        / times_us.len() as f64;
    let rsd = if mean > 0.0 {
        variance.sqrt() / mean * 100.0
    } else {
        0.0
    };

    TimingReport {
        mean_us: mean,
        rsd_percent: rsd,
    }
}
