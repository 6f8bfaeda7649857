// SPDX-License-Identifier: LGPL-3.0-or-later

//! Linear-rate limiter for dB-domain control signals.
//!
//! Bounds how fast a control value may change per sample, with separate
//! rates for rising and falling. Rates are expressed as the time needed
//! to traverse 60 dB, matching how attack/release times are specified.

use crate::consts::SLEW_RANGE_DB;
use crate::units::millis_to_samples;

/// Slew limiter over a dB value.
///
/// [`process`](SlewLimiter::process) moves the output toward the target
/// by at most the configured per-sample rate in each direction, landing
/// exactly on the target once it is within one step. No overshoot.
///
/// # Examples
///
/// ```
/// use gate_dsp_units::ctl::SlewLimiter;
///
/// let mut slew = SlewLimiter::new();
/// slew.set_sample_rate(48000.0)
///     .set_slew_up(5.0)     // 60 dB rise in 5 ms
///     .set_slew_down(100.0) // 60 dB fall in 100 ms
///     .update_settings();
///
/// let y = slew.process(-60.0);
/// assert!(y > -60.0); // bounded fall, not an instant jump
/// ```
#[derive(Debug, Clone)]
pub struct SlewLimiter {
    sample_rate: f32,
    slew_up_ms: f32,
    slew_down_ms: f32,

    /// Maximum rise per sample, in dB.
    slew_up: f32,
    /// Maximum fall per sample, in dB.
    slew_down: f32,

    output: f32,
    dirty: bool,
}

impl Default for SlewLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl SlewLimiter {
    /// Create a limiter with default settings.
    ///
    /// Defaults: 48 kHz, 1 dB per sample in both directions until
    /// configured.
    pub fn new() -> Self {
        Self {
            sample_rate: 48000.0,
            slew_up_ms: 0.0,
            slew_down_ms: 0.0,
            slew_up: 1.0,
            slew_down: 1.0,
            output: 0.0,
            dirty: false,
        }
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sr: f32) -> &mut Self {
        self.sample_rate = sr;
        self.dirty = true;
        self
    }

    /// Set the time to rise 60 dB, in milliseconds.
    pub fn set_slew_up(&mut self, ms: f32) -> &mut Self {
        self.slew_up_ms = ms;
        self.dirty = true;
        self
    }

    /// Set the time to fall 60 dB, in milliseconds.
    pub fn set_slew_down(&mut self, ms: f32) -> &mut Self {
        self.slew_down_ms = ms;
        self.dirty = true;
        self
    }

    /// Recompute the per-sample rates after parameter changes.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let up_samples = millis_to_samples(self.sample_rate, self.slew_up_ms);
        let down_samples = millis_to_samples(self.sample_rate, self.slew_down_ms);
        if up_samples > 0.0 {
            self.slew_up = SLEW_RANGE_DB / up_samples;
        }
        if down_samples > 0.0 {
            self.slew_down = SLEW_RANGE_DB / down_samples;
        }
    }

    /// Maximum rise per sample, in dB.
    pub fn slew_up(&self) -> f32 {
        self.slew_up
    }

    /// Maximum fall per sample, in dB.
    pub fn slew_down(&self) -> f32 {
        self.slew_down
    }

    /// Reset the output to the given value.
    pub fn reset_to(&mut self, value: f32) {
        self.output = value;
    }

    /// Advance the output toward `value`, bounded by the slew rates.
    #[inline]
    pub fn process(&mut self, value: f32) -> f32 {
        if value > self.output {
            if value > self.output + self.slew_up {
                self.output += self.slew_up;
            } else {
                self.output = value;
            }
        } else if value < self.output - self.slew_down {
            self.output -= self.slew_down;
        } else {
            self.output = value;
        }

        self.output
    }
}
