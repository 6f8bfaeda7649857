// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad coefficient calculation using the RBJ Audio EQ Cookbook.
//!
//! Coefficients are returned with `a1` and `a2` **pre-negated** relative to
//! the standard cookbook formulas. The processing loop uses addition
//! (`d0 = b1*x + a1*y + d1`), so the sign flip is baked into the
//! coefficients.

use std::f32::consts::PI;

/// Supported biquad filter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// Bypass (identity): passes signal unchanged.
    Off,
    /// Second-order low-pass filter.
    Lowpass,
    /// Second-order high-pass filter.
    Highpass,
    /// Notch (band-reject) filter, e.g. for hum elimination ahead of the
    /// gate detector.
    Notch,
}

/// Biquad coefficients with pre-negated feedback terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    /// Negated feedback coefficient (`-a1_standard / a0`).
    pub a1: f32,
    /// Negated feedback coefficient (`-a2_standard / a0`).
    pub a2: f32,
}

impl Default for BiquadCoeffs {
    /// Identity (bypass) coefficients.
    fn default() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }
}

/// Calculate biquad coefficients for the given filter type.
///
/// # Arguments
/// * `filter_type` - Type of filter to compute
/// * `sample_rate` - Sample rate in Hz (must be > 0)
/// * `freq` - Center or cutoff frequency in Hz
/// * `q` - Quality factor (must be > 0)
pub fn calc_biquad_coeffs(
    filter_type: FilterType,
    sample_rate: f32,
    freq: f32,
    q: f32,
) -> BiquadCoeffs {
    if filter_type == FilterType::Off {
        return BiquadCoeffs::default();
    }

    let w0 = 2.0 * PI * freq / sample_rate;
    let cos_w0 = w0.cos();
    let sin_w0 = w0.sin();
    let alpha = sin_w0 / (2.0 * q);

    let (b0, b1, b2, a0, a1_std, a2_std) = match filter_type {
        FilterType::Off => unreachable!(),

        FilterType::Lowpass => {
            let b1 = 1.0 - cos_w0;
            let b0 = b1 / 2.0;
            let b2 = b0;
            let a0 = 1.0 + alpha;
            let a1_std = -2.0 * cos_w0;
            let a2_std = 1.0 - alpha;
            (b0, b1, b2, a0, a1_std, a2_std)
        }

        FilterType::Highpass => {
            let b1 = -(1.0 + cos_w0);
            let b0 = (1.0 + cos_w0) / 2.0;
            let b2 = b0;
            let a0 = 1.0 + alpha;
            let a1_std = -2.0 * cos_w0;
            let a2_std = 1.0 - alpha;
            (b0, b1, b2, a0, a1_std, a2_std)
        }

        FilterType::Notch => {
            let b0 = 1.0;
            let b1 = -2.0 * cos_w0;
            let b2 = 1.0;
            let a0 = 1.0 + alpha;
            let a1_std = -2.0 * cos_w0;
            let a2_std = 1.0 - alpha;
            (b0, b1, b2, a0, a1_std, a2_std)
        }
    };

    BiquadCoeffs {
        b0: b0 / a0,
        b1: b1 / a0,
        b2: b2 / a0,
        a1: -a1_std / a0,
        a2: -a2_std / a0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_is_identity() {
        let c = calc_biquad_coeffs(FilterType::Off, 48000.0, 1000.0, 1.0);
        assert_eq!(c, BiquadCoeffs::default());
    }

    #[test]
    fn test_lowpass_dc_gain_is_unity() {
        // At DC (z = 1): H = (b0 + b1 + b2) / (1 - a1 - a2)
        let c = calc_biquad_coeffs(FilterType::Lowpass, 48000.0, 2000.0, 1.0);
        let h_dc = (c.b0 + c.b1 + c.b2) / (1.0 - c.a1 - c.a2);
        assert!(
            (h_dc - 1.0).abs() < 1e-4,
            "Lowpass DC gain should be unity: {h_dc}"
        );
    }

    #[test]
    fn test_highpass_dc_gain_is_zero() {
        let c = calc_biquad_coeffs(FilterType::Highpass, 48000.0, 100.0, 1.0);
        let h_dc = (c.b0 + c.b1 + c.b2) / (1.0 - c.a1 - c.a2);
        assert!(
            h_dc.abs() < 1e-4,
            "Highpass DC gain should be zero: {h_dc}"
        );
    }

    #[test]
    fn test_notch_dc_gain_is_unity() {
        let c = calc_biquad_coeffs(FilterType::Notch, 48000.0, 50.0, 1.0);
        let h_dc = (c.b0 + c.b1 + c.b2) / (1.0 - c.a1 - c.a2);
        assert!((h_dc - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_stability_for_gate_settings() {
        // Poles inside the unit circle for the Q/frequency ranges the gate
        // uses: |a2| < 1 and |a1| < 1 + a2 (with our negated convention,
        // a1/a2 are the negated standard coefficients)
        for (ft, freq) in [
            (FilterType::Lowpass, 2000.0),
            (FilterType::Highpass, 100.0),
            (FilterType::Notch, 50.0),
        ] {
            let c = calc_biquad_coeffs(ft, 48000.0, freq, 1.0);
            let a1_std = -c.a1;
            let a2_std = -c.a2;
            assert!(a2_std.abs() < 1.0, "{ft:?}: |a2| must be < 1");
            assert!(a1_std.abs() < 1.0 + a2_std, "{ft:?}: pole radius too large");
        }
    }
}
