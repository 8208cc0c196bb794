//! Test signal generation command.

use crate::signal;
use crate::wav::{self, WavSpec};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Arguments for `tope generate`.
#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate seeded white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,

        /// PRNG seed (left channel; right uses seed + 1)
        #[arg(long, default_value = "1")]
        seed: u32,
    },

    /// Generate a sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "1000.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate a single-sample impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },
}

/// Execute `tope generate`.
pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
            seed,
        } => {
            let len = (duration * sample_rate as f32) as usize;
            let left = signal::Noise::new(seed).render(len, amplitude);
            let right = signal::Noise::new(seed.wrapping_add(1)).render(len, amplitude);
            write(&output, &left, &right, sample_rate)?;
            println!("Wrote {len} frames of noise to {}", output.display());
        }
        GenerateCommand::Sine {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            let len = (duration * sample_rate as f32) as usize;
            let tone = signal::sine(len, sample_rate as f32, freq, amplitude);
            write(&output, &tone, &tone, sample_rate)?;
            println!(
                "Wrote {len} frames of {freq} Hz sine to {}",
                output.display()
            );
        }
        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
            amplitude,
        } => {
            let pulse = signal::impulse(length, amplitude);
            write(&output, &pulse, &pulse, sample_rate)?;
            println!("Wrote {length}-sample impulse to {}", output.display());
        }
    }
    Ok(())
}

fn write(path: &Path, left: &[f32], right: &[f32], sample_rate: u32) -> wav::Result<()> {
    wav::write_stereo(
        path,
        left,
        right,
        WavSpec {
            sample_rate,
            bits_per_sample: 32,
        },
    )
}
