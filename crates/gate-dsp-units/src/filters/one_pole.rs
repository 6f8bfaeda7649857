// SPDX-License-Identifier: LGPL-3.0-or-later

//! First-order (one-pole) low-pass and high-pass filters.
//!
//! The low-pass update is `y += alpha * (x - y)`; the high-pass output is
//! the input minus the low-pass state. Used for the 100 Hz detector
//! high-pass and for smoothing stages.

use crate::units::lp_alpha;

/// One-pole filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnePoleType {
    /// First-order low-pass.
    Lowpass,
    /// First-order high-pass (input minus low-pass state).
    Highpass,
}

/// First-order recursive filter.
///
/// # Examples
///
/// ```
/// use gate_dsp_units::filters::{OnePole, OnePoleType};
///
/// let mut hp = OnePole::new();
/// hp.set_sample_rate(48000.0)
///     .set_filter_type(OnePoleType::Highpass)
///     .set_cutoff(100.0)
///     .update_settings();
///
/// let y = hp.process_sample(0.5);
/// assert!(y.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct OnePole {
    filter_type: OnePoleType,
    sample_rate: f32,
    cutoff: f32,
    alpha: f32,
    state: f32,
    dirty: bool,
}

impl Default for OnePole {
    fn default() -> Self {
        Self::new()
    }
}

impl OnePole {
    /// Create a new one-pole filter.
    ///
    /// Defaults: low-pass, 48 kHz, 1000 Hz cutoff.
    pub fn new() -> Self {
        Self {
            filter_type: OnePoleType::Lowpass,
            sample_rate: 48000.0,
            cutoff: 1000.0,
            alpha: 0.0,
            state: 0.0,
            dirty: true,
        }
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sr: f32) -> &mut Self {
        self.sample_rate = sr;
        self.dirty = true;
        self
    }

    /// Set the filter mode.
    pub fn set_filter_type(&mut self, ft: OnePoleType) -> &mut Self {
        self.filter_type = ft;
        self
    }

    /// Set the cutoff frequency in Hz.
    pub fn set_cutoff(&mut self, freq: f32) -> &mut Self {
        self.cutoff = freq;
        self.dirty = true;
        self
    }

    /// Recompute the filter coefficient if parameters changed.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.alpha = lp_alpha(self.cutoff, 1.0 / self.sample_rate);
    }

    /// Reset the filter state.
    pub fn clear(&mut self) {
        self.state = 0.0;
    }

    /// Process a single sample.
    #[inline]
    pub fn process_sample(&mut self, s: f32) -> f32 {
        self.state += self.alpha * (s - self.state);
        match self.filter_type {
            OnePoleType::Lowpass => self.state,
            OnePoleType::Highpass => s - self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowpass_converges_to_dc() {
        let mut lp = OnePole::new();
        lp.set_sample_rate(48000.0)
            .set_filter_type(OnePoleType::Lowpass)
            .set_cutoff(200.0)
            .update_settings();

        let mut y = 0.0;
        for _ in 0..48000 {
            y = lp.process_sample(0.75);
        }
        assert!((y - 0.75).abs() < 1e-4, "Lowpass should settle on DC: {y}");
    }

    #[test]
    fn test_highpass_rejects_dc() {
        let mut hp = OnePole::new();
        hp.set_sample_rate(48000.0)
            .set_filter_type(OnePoleType::Highpass)
            .set_cutoff(100.0)
            .update_settings();

        let mut y = 1.0;
        for _ in 0..48000 {
            y = hp.process_sample(1.0);
        }
        assert!(y.abs() < 1e-4, "Highpass should reject DC: {y}");
    }

    #[test]
    fn test_lowpass_is_monotone_on_step() {
        let mut lp = OnePole::new();
        lp.set_sample_rate(48000.0)
            .set_cutoff(200.0)
            .update_settings();

        let mut prev = 0.0;
        for _ in 0..1000 {
            let y = lp.process_sample(1.0);
            assert!(y >= prev, "One-pole step response must be monotone");
            assert!(y <= 1.0);
            prev = y;
        }
    }

    #[test]
    fn test_clear() {
        let mut lp = OnePole::new();
        lp.set_sample_rate(48000.0)
            .set_cutoff(200.0)
            .update_settings();

        for _ in 0..100 {
            lp.process_sample(1.0);
        }
        lp.clear();
        assert_eq!(lp.state, 0.0);
    }
}
