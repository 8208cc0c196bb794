//! File-based limiter processing command.

use crate::export;
use crate::preset::LimiterPreset;
use crate::wav::{self, WavSpec};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tope_core::Sample;

/// Arguments for `tope process`.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (always stereo)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset TOML file; flags below override individual fields
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Pre-gain in dB
    #[arg(long)]
    pre_gain: Option<f64>,

    /// Attack time in seconds
    #[arg(long)]
    attack: Option<f64>,

    /// Hold time in seconds
    #[arg(long)]
    hold: Option<f64>,

    /// Release time in seconds
    #[arg(long)]
    release: Option<f64>,

    /// Threshold (ceiling) in dB
    #[arg(long)]
    threshold: Option<f64>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Run the whole pipeline in double precision
    #[arg(long)]
    double: bool,

    /// Dump input/output columns to a CSV file for measurement
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the effective settings back out as a preset TOML
    #[arg(long)]
    save_preset: Option<PathBuf>,
}

/// Execute `tope process`.
pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (left, right, spec) = wav::read_stereo(&args.input)?;
    println!(
        "  {} frames, {} Hz, {:.2}s",
        left.len(),
        spec.sample_rate,
        left.len() as f32 / spec.sample_rate as f32
    );

    let mut preset = match &args.preset {
        Some(path) => LimiterPreset::load(path)?,
        None => LimiterPreset::default(),
    };
    if let Some(v) = args.pre_gain {
        preset.pre_gain_db = v;
    }
    if let Some(v) = args.attack {
        preset.attack_time = v;
    }
    if let Some(v) = args.hold {
        preset.hold_time = v;
    }
    if let Some(v) = args.release {
        preset.release_time = v;
    }
    if let Some(v) = args.threshold {
        preset.threshold_db = v;
    }
    preset.validate()?;

    if let Some(preset_path) = &args.save_preset {
        preset.save(preset_path)?;
        println!("Saved preset to {}", preset_path.display());
    }

    tracing::debug!(?preset, block_size = args.block_size, "processing configuration");

    let block_size = args.block_size.max(1);
    let sample_rate = f64::from(spec.sample_rate);
    let (out_l, out_r) = if args.double {
        render::<f64>(&preset, sample_rate, &left, &right, block_size)
    } else {
        render::<f32>(&preset, sample_rate, &left, &right, block_size)
    };

    let out_spec = WavSpec {
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    wav::write_stereo(&args.output, &out_l, &out_r, out_spec)?;
    println!("Wrote {}", args.output.display());

    if let Some(csv_path) = &args.csv {
        export::write_csv(
            csv_path,
            &[
                ("in_left", &left),
                ("in_right", &right),
                ("out_left", &out_l),
                ("out_right", &out_r),
            ],
        )?;
        println!("Dumped measurement CSV to {}", csv_path.display());
    }

    Ok(())
}

/// Run the limiter over the file in blocks at the chosen precision.
fn render<R: Sample>(
    preset: &LimiterPreset,
    sample_rate: f64,
    left: &[f32],
    right: &[f32],
    block_size: usize,
) -> (Vec<f32>, Vec<f32>) {
    let mut limiter = preset.build_limiter::<R>(sample_rate);
    println!(
        "  look-ahead: {} samples ({:.2} ms)",
        limiter.latency_samples(),
        limiter.latency_samples() as f64 / sample_rate * 1000.0
    );

    let in_l: Vec<R> = left.iter().map(|&s| R::from_f64(f64::from(s))).collect();
    let in_r: Vec<R> = right.iter().map(|&s| R::from_f64(f64::from(s))).collect();
    let mut out_l = vec![R::zero(); in_l.len()];
    let mut out_r = vec![R::zero(); in_r.len()];

    let blocks = in_l.len().div_ceil(block_size);
    let progress = ProgressBar::new(blocks as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} blocks").expect("static template"),
    );

    let mut offset = 0;
    while offset < in_l.len() {
        let end = (offset + block_size).min(in_l.len());
        limiter.process(
            &in_l[offset..end],
            &in_r[offset..end],
            &mut out_l[offset..end],
            &mut out_r[offset..end],
        );
        offset = end;
        progress.inc(1);
    }
    progress.finish_and_clear();

    (
        out_l.iter().map(|&s| s.to_f64() as f32).collect(),
        out_r.iter().map(|&s| s.to_f64() as f32).collect(),
    )
}
