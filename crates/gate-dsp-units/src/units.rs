// SPDX-License-Identifier: LGPL-3.0-or-later

//! Unit conversion functions.
//!
//! Conversions between time and sample counts, decibels and linear gain,
//! and the one-pole filter coefficient used by the envelope follower.

use std::f32::consts::{LN_10, PI};

/// Convert milliseconds to sample count.
///
/// # Arguments
/// * `sr` - Sample rate in Hz
/// * `time` - Time in milliseconds
#[inline]
pub fn millis_to_samples(sr: f32, time: f32) -> f32 {
    time * sr / 1000.0
}

/// Convert sample count to milliseconds.
///
/// # Arguments
/// * `sr` - Sample rate in Hz
/// * `samples` - Number of samples
#[inline]
pub fn samples_to_millis(sr: f32, samples: f32) -> f32 {
    samples * 1000.0 / sr
}

/// Convert seconds to sample count.
///
/// # Arguments
/// * `sr` - Sample rate in Hz
/// * `time` - Time in seconds
#[inline]
pub fn seconds_to_samples(sr: f32, time: f32) -> f32 {
    time * sr
}

/// Convert decibels to linear gain (amplitude ratio).
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    (db * (LN_10 / 20.0)).exp()
}

/// Convert linear gain (amplitude ratio) to decibels.
///
/// A gain of zero yields `-inf`; callers that feed envelope values into
/// dB-domain math clamp the result at a floor instead.
#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    20.0 * gain.log10()
}

/// Compute the one-pole low-pass coefficient for a cutoff frequency.
///
/// `alpha = k / (k + 1)` with `k = 2π · cutoff_hz · sample_interval`.
/// The filter update is `y = alpha * x + (1 - alpha) * y`.
///
/// # Arguments
/// * `cutoff_hz` - Cutoff frequency in Hz
/// * `sample_interval` - Sample period in seconds (`1 / sr`)
#[inline]
pub fn lp_alpha(cutoff_hz: f32, sample_interval: f32) -> f32 {
    let k = 2.0 * PI * cutoff_hz * sample_interval;
    k / (k + 1.0)
}
