// SPDX-License-Identifier: LGPL-3.0-or-later

//! High-level biquad filter with parameter management.
//!
//! Wraps the RBJ coefficient calculation from [`coeffs`](super::coeffs)
//! with dirty-flag recalculation and a transposed direct-form II state.

use super::coeffs::{BiquadCoeffs, FilterType, calc_biquad_coeffs};

/// Second-order filter with automatic coefficient management.
///
/// Uses the builder pattern for parameter configuration. Call
/// [`update_settings`](Filter::update_settings) after changing parameters
/// to recalculate biquad coefficients.
///
/// # Examples
///
/// ```
/// use gate_dsp_units::filters::{Filter, FilterType};
///
/// let mut filt = Filter::new();
/// filt.set_sample_rate(48000.0)
///     .set_filter_type(FilterType::Lowpass)
///     .set_frequency(2000.0)
///     .set_q(1.0)
///     .update_settings();
///
/// let input = [1.0, 0.0, 0.0, 0.0];
/// let mut output = [0.0; 4];
/// filt.process(&mut output, &input);
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    filter_type: FilterType,
    sample_rate: f32,
    frequency: f32,
    q: f32,
    coeffs: BiquadCoeffs,
    // Transposed direct-form II delay memory
    d: [f32; 2],
    dirty: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter {
    /// Create a new filter with default settings.
    ///
    /// Defaults: Off, 48 kHz, 1000 Hz, Q = 0.707.
    pub fn new() -> Self {
        Self {
            filter_type: FilterType::Off,
            sample_rate: 48000.0,
            frequency: 1000.0,
            q: std::f32::consts::FRAC_1_SQRT_2,
            coeffs: BiquadCoeffs::default(),
            d: [0.0; 2],
            dirty: true,
        }
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sr: f32) -> &mut Self {
        self.sample_rate = sr;
        self.dirty = true;
        self
    }

    /// Set the filter type.
    pub fn set_filter_type(&mut self, ft: FilterType) -> &mut Self {
        self.filter_type = ft;
        self.dirty = true;
        self
    }

    /// Set the center/cutoff frequency in Hz.
    pub fn set_frequency(&mut self, freq: f32) -> &mut Self {
        self.frequency = freq;
        self.dirty = true;
        self
    }

    /// Set the quality factor.
    pub fn set_q(&mut self, q: f32) -> &mut Self {
        self.q = q;
        self.dirty = true;
        self
    }

    /// Recalculate coefficients if any parameter has changed.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        self.coeffs =
            calc_biquad_coeffs(self.filter_type, self.sample_rate, self.frequency, self.q);
    }

    /// Return the current coefficients.
    pub fn coefficients(&self) -> BiquadCoeffs {
        self.coeffs
    }

    /// Reset the filter state (clear delay memory).
    ///
    /// Does not change the filter parameters or coefficients.
    pub fn clear(&mut self) {
        self.d = [0.0; 2];
    }

    /// Process a single sample.
    #[inline]
    pub fn process_sample(&mut self, s: f32) -> f32 {
        let c = &self.coeffs;
        let y = c.b0 * s + self.d[0];
        let p1 = c.b1 * s + c.a1 * y;
        let p2 = c.b2 * s + c.a2 * y;
        self.d[0] = self.d[1] + p1;
        self.d[1] = p2;
        y
    }

    /// Process audio from `src` into `dst`.
    ///
    /// Output length is `min(dst.len(), src.len())`. Calls
    /// [`update_settings`](Filter::update_settings) automatically if
    /// parameters are dirty.
    pub fn process(&mut self, dst: &mut [f32], src: &[f32]) {
        if self.dirty {
            self.update_settings();
        }
        let n = dst.len().min(src.len());
        for i in 0..n {
            dst[i] = self.process_sample(src[i]);
        }
    }
}
