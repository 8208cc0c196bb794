//! Tope Core - DSP primitives for look-ahead peak limiting
//!
//! This crate provides the envelope-shaping building blocks that the
//! [`tope-dynamics`](https://github.com/ampactor-labs/tope) limiter is
//! assembled from, designed for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Components
//!
//! - [`SmoothDelay`] - Crossfading look-ahead delay line. Delay-time changes
//!   crossfade between two integer taps instead of resampling, so parameter
//!   automation never produces pitch (Doppler) artefacts.
//! - [`PeakHoldCascade`] - Series peak-hold sections approximating a moving
//!   maximum over the look-ahead window while still surfacing secondary
//!   peaks inside it.
//! - [`ExpSmootherCascade`] - Cascaded one-pole smoothers with per-stage
//!   attack/release branching and a time-constant correction that keeps the
//!   composite rise/fall times equal to the configured values.
//!
//! # Sample Types
//!
//! Everything is generic over [`Sample`], implemented for `f32` and `f64`.
//! Coefficients are computed in the sample type itself, so double-precision
//! processing keeps its accuracy at very long time constants.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tope-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: `num-traits` with the `libm` backend
//! - **Deterministic**: Identical input and configuration produce
//!   bit-identical output

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod math;
pub mod peak_hold;
pub mod sample;
pub mod smooth_delay;
pub mod smoother;

// Re-export main types at crate root
pub use math::{db_to_linear, flush_denormal, linear_to_db};
pub use peak_hold::PeakHoldCascade;
pub use sample::Sample;
pub use smooth_delay::{CAPACITY, SmoothDelay};
pub use smoother::ExpSmootherCascade;
