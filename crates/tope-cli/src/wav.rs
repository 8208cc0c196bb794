//! Stereo WAV reading and writing.
//!
//! Thin wrapper over `hound` that always presents audio as two `f32`
//! channel buffers. Mono files are duplicated onto both channels; files
//! with more than two channels are rejected (the limiter is strictly
//! stereo).

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Error type for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel layouts other than mono or stereo are not supported.
    #[error("unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// Only 16/24-bit PCM and 32-bit float are supported.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for WAV operations.
pub type Result<T> = std::result::Result<T, Error>;

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

/// Read a WAV file as a stereo pair of `f32` buffers.
///
/// Integer PCM is normalised to [-1, 1]; mono input is duplicated to both
/// channels.
pub fn read_stereo<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, Vec<f32>, WavSpec)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels;
    if channels == 0 || channels > 2 {
        return Err(Error::UnsupportedChannels(channels));
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<hound::Result<_>>()?,
        SampleFormat::Int => {
            let scale = match spec.bits_per_sample {
                16 => f32::from(i16::MAX),
                24 => 8_388_607.0,
                32 => i32::MAX as f32,
                other => return Err(Error::UnsupportedBitDepth(other)),
            };
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<hound::Result<_>>()?
        }
    };

    let (left, right) = if channels == 1 {
        (samples.clone(), samples)
    } else {
        let mut left = Vec::with_capacity(samples.len() / 2);
        let mut right = Vec::with_capacity(samples.len() / 2);
        for frame in samples.chunks_exact(2) {
            left.push(frame[0]);
            right.push(frame[1]);
        }
        (left, right)
    };

    Ok((
        left,
        right,
        WavSpec {
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        },
    ))
}

/// Write a stereo pair of `f32` buffers to a WAV file.
///
/// `bits_per_sample` of 16 or 24 writes integer PCM (values clamped to
/// [-1, 1] first); 32 writes IEEE float.
pub fn write_stereo<P: AsRef<Path>>(
    path: P,
    left: &[f32],
    right: &[f32],
    spec: WavSpec,
) -> Result<()> {
    debug_assert_eq!(left.len(), right.len());

    let hound_spec = hound::WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        sample_format: if spec.bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };

    let mut writer = WavWriter::create(path, hound_spec)?;
    match spec.bits_per_sample {
        32 => {
            for (&l, &r) in left.iter().zip(right.iter()) {
                writer.write_sample(l)?;
                writer.write_sample(r)?;
            }
        }
        16 => {
            for (&l, &r) in left.iter().zip(right.iter()) {
                writer.write_sample((l.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16)?;
                writer.write_sample((r.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16)?;
            }
        }
        24 => {
            for (&l, &r) in left.iter().zip(right.iter()) {
                writer.write_sample((l.clamp(-1.0, 1.0) * 8_388_607.0) as i32)?;
                writer.write_sample((r.clamp(-1.0, 1.0) * 8_388_607.0) as i32)?;
            }
        }
        other => return Err(Error::UnsupportedBitDepth(other)),
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.wav");

        let left: Vec<f32> = (0..64).map(|n| (n as f32 * 0.1).sin() * 0.5).collect();
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        write_stereo(&path, &left, &right, WavSpec::default()).unwrap();

        let (read_l, read_r, spec) = read_stereo(&path).unwrap();
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(read_l, left);
        assert_eq!(read_r, right);
    }

    #[test]
    fn pcm16_roundtrip_within_quantisation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcm16.wav");

        let left: Vec<f32> = (0..64).map(|n| (n as f32 * 0.2).cos() * 0.9).collect();
        let spec = WavSpec {
            sample_rate: 44100,
            bits_per_sample: 16,
        };
        write_stereo(&path, &left, &left, spec).unwrap();

        let (read_l, _, read_spec) = read_stereo(&path).unwrap();
        assert_eq!(read_spec.sample_rate, 44100);
        for (a, b) in left.iter().zip(read_l.iter()) {
            assert!((a - b).abs() < 1.0 / 16384.0, "{a} vs {b}");
        }
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        let spec = WavSpec {
            sample_rate: 48000,
            bits_per_sample: 8,
        };
        assert!(matches!(
            write_stereo(&path, &[0.0], &[0.0], spec),
            Err(Error::UnsupportedBitDepth(8))
        ));
    }
}
