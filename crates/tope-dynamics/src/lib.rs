//! Tope Dynamics - stereo look-ahead peak limiting
//!
//! This crate provides [`Limiter`], a brickwall peak limiter that combines
//! the `tope-core` primitives into a complete gain-computation chain:
//!
//! 1. Smoothed pre-gain drives the input towards (or past) the ceiling.
//! 2. A linked mono side-chain feeds a cascaded peak-hold, giving the
//!    limiter a full look-ahead window of advance warning.
//! 3. A cascaded attack/release smoother turns the held peaks into a
//!    low-distortion attenuation envelope.
//! 4. The raw audio, delayed by exactly the look-ahead, is scaled by
//!    `threshold / envelope`.
//!
//! ```rust
//! use tope_dynamics::Limiter;
//!
//! let mut limiter = Limiter::<f32>::new(48000.0);
//! limiter.set_pre_gain(6.0);
//! limiter.set_threshold(-0.3);
//!
//! let silence = [0.0_f32; 64];
//! let mut left = [0.0_f32; 64];
//! let mut right = [0.0_f32; 64];
//! limiter.process(&silence, &silence, &mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod limiter;

pub use limiter::Limiter;
