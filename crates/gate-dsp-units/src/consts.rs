// SPDX-License-Identifier: LGPL-3.0-or-later

//! Gain constants and tuned gate parameters.
//!
//! The tuning constants at the bottom are empirically chosen values carried
//! over from listening tests; they are named here instead of being derived.

// Signal floor

/// Effective-silence floor for dB computations. Levels below this are
/// treated as silence and clamped rather than propagated as `-inf`.
pub const SIGNAL_FLOOR_DB: f32 = -150.0;

// Gain constants (linear amplitude ratios for common dB values)

/// 0 dB amplitude gain (1.0)
pub const GAIN_AMP_0_DB: f32 = 1.0;

/// -20 dB amplitude gain (0.1)
pub const GAIN_AMP_M_20_DB: f32 = 1e-1;

/// -60 dB amplitude gain (0.001)
pub const GAIN_AMP_M_60_DB: f32 = 1e-3;

/// -100 dB amplitude gain (0.00001)
pub const GAIN_AMP_M_100_DB: f32 = 1e-5;

/// -150 dB amplitude gain, the linear equivalent of [`SIGNAL_FLOOR_DB`]
pub const GAIN_AMP_M_150_DB: f32 = 3.162_277_6e-8;

// Tuned gate parameters

/// Default per-sample geometric decay of the peak detector fallback value.
pub const PEAK_DECAY_DFL: f32 = 0.995;

/// Default peak-hold window of the peak detector, in milliseconds.
pub const PEAK_HOLD_MS_DFL: f32 = 10.0;

/// Scaling applied to the SMA-derived decay rate in the envelope follower,
/// so the follower decays slightly faster than the signal and gently bumps
/// into its peaks.
pub const DECAY_FUDGE: f32 = 1.2;

/// The release-side expansion curve is this many times steeper than the
/// attack-side curve, forming the hysteresis band of the expander.
pub const LOWER_SLOPE_FACTOR: f32 = 3.0;

/// The slew limiter rates are expressed as the time needed to traverse
/// this many dB.
pub const SLEW_RANGE_DB: f32 = 60.0;
