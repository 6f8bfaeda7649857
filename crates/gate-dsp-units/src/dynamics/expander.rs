// SPDX-License-Identifier: LGPL-3.0-or-later

//! Downward expander with a dual-slope hysteresis band.
//!
//! The expander maps an envelope level (dB) to a gain (dB). Two expansion
//! curves are evaluated against the same threshold: the attack-side curve
//! at the configured slope and a release-side curve three times steeper.
//! Between the two curves the output follows the input delta one-to-one,
//! so small level wiggles below threshold pass through without gain
//! chatter; at a curve boundary the curve takes over.

use crate::consts::{LOWER_SLOPE_FACTOR, SIGNAL_FLOOR_DB};
use crate::units::db_to_gain;

/// Knee-interpolated compression curve run in reverse as expansion.
///
/// Below `threshold - knee` the compression branch is passthrough; above
/// `threshold + knee` the deviation from threshold is divided by `ratio`;
/// inside the knee the two branches are blended linearly. The whole curve
/// is then rescaled (`out * ratio - (threshold * ratio - threshold)`) so
/// that it expands instead: unity slope above threshold, `ratio`-scaled
/// slope below.
///
/// A `ratio` of zero or a knee collapsing to a point is a configuration
/// error; the curve does not guard against it.
pub fn expansion_curve(x: f32, threshold: f32, ratio: f32, knee: f32) -> f32 {
    let knee_low = threshold - knee;
    let knee_high = threshold + knee;

    let output = if x <= knee_low {
        x
    } else if x >= knee_high {
        threshold + (x - threshold) / ratio
    } else {
        // Blend between the two branches by position inside the knee
        let position = (x - knee_low) / (knee_high - knee_low);
        let k_diff = knee * position;
        let xa = knee_low + k_diff;
        let yb = threshold + k_diff / ratio;
        let slope = (yb - xa) / knee;
        xa + slope * position * knee
    };

    output * ratio - (threshold * ratio - threshold)
}

/// Envelope-to-gain expander.
///
/// [`expand`](Expander::expand) consumes the envelope level in dB and
/// returns the gain to apply in dB, floored at the configured maximum
/// reduction.
///
/// # Examples
///
/// ```
/// use gate_dsp_units::dynamics::Expander;
///
/// let mut exp = Expander::new();
/// exp.set_threshold(-20.0)
///     .set_reduction(-100.0)
///     .set_slope(3.0)
///     .update_settings();
///
/// // Level above threshold: no reduction
/// let mut gain_db = 0.0;
/// for _ in 0..10 {
///     gain_db = exp.expand(-10.0);
/// }
/// assert_eq!(gain_db, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Expander {
    threshold_db: f32,
    reduction_db: f32,
    slope: f32,

    upper_slope: f32,
    lower_slope: f32,

    prev_in_db: f32,
    output_db: f32,
    gain_db: f32,
    gain: f32,
    dirty: bool,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander {
    /// Create an expander with default settings.
    ///
    /// Defaults: −20 dB threshold, −100 dB reduction, slope 2.
    pub fn new() -> Self {
        let mut exp = Self {
            threshold_db: -20.0,
            reduction_db: -100.0,
            slope: 2.0,
            upper_slope: 2.0,
            lower_slope: 2.0 * LOWER_SLOPE_FACTOR,
            prev_in_db: SIGNAL_FLOOR_DB,
            output_db: SIGNAL_FLOOR_DB,
            gain_db: 0.0,
            gain: 1.0,
            dirty: true,
        };
        exp.update_settings();
        exp
    }

    /// Set the threshold in dB below which expansion starts.
    pub fn set_threshold(&mut self, db: f32) -> &mut Self {
        self.threshold_db = db;
        self.dirty = true;
        self
    }

    /// Set the maximum gain reduction in dB (a negative value).
    pub fn set_reduction(&mut self, db: f32) -> &mut Self {
        self.reduction_db = db;
        self.dirty = true;
        self
    }

    /// Set the attack-side expansion slope.
    ///
    /// The release-side slope is derived as three times this value. A
    /// slope of zero or below is a configuration error.
    pub fn set_slope(&mut self, slope: f32) -> &mut Self {
        self.slope = slope;
        self.dirty = true;
        self
    }

    /// Recompute the two curve slopes after parameter changes.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        self.upper_slope = self.slope;
        self.lower_slope = self.slope * LOWER_SLOPE_FACTOR;
    }

    /// Reset tracking state to the signal floor.
    pub fn clear(&mut self) {
        self.prev_in_db = SIGNAL_FLOOR_DB;
        self.output_db = SIGNAL_FLOOR_DB;
        self.gain_db = 0.0;
        self.gain = 1.0;
    }

    /// The gain from the last [`expand`](Expander::expand) call, in dB.
    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    /// The gain from the last [`expand`](Expander::expand) call, linear.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Consume one envelope level (dB) and return the gain to apply (dB).
    pub fn expand(&mut self, db_val: f32) -> f32 {
        let db_val = db_val.max(self.reduction_db);

        // The two curves bound the permitted output level
        let upper_db = expansion_curve(db_val, self.threshold_db, self.upper_slope, 0.0);
        let lower_db = expansion_curve(db_val, self.threshold_db, self.lower_slope, 0.0);

        // Status quo: the output follows the input delta one-to-one
        let mut desired_db = self.output_db + (db_val - self.prev_in_db);
        if desired_db < lower_db {
            desired_db = lower_db;
        } else if desired_db > upper_db {
            desired_db = upper_db;
        }

        self.output_db = desired_db;
        self.prev_in_db = db_val;

        // The gain closes the gap between desired and actual level,
        // floored at the configured maximum reduction
        self.gain_db = (self.output_db - db_val).max(self.reduction_db);
        self.gain = db_to_gain(self.gain_db);

        self.gain_db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_expander() -> Expander {
        let mut exp = Expander::new();
        exp.set_threshold(-20.0)
            .set_reduction(-100.0)
            .set_slope(3.0)
            .update_settings();
        exp
    }

    #[test]
    fn test_curve_passthrough_above_threshold() {
        // Above threshold the expansion curve has unity slope and no offset
        for x in [-19.0, -10.0, 0.0, 6.0] {
            let y = expansion_curve(x, -20.0, 3.0, 0.0);
            assert!(
                (y - x).abs() < 1e-4,
                "Curve must pass through above threshold: f({x}) = {y}"
            );
        }
    }

    #[test]
    fn test_curve_slope_below_threshold() {
        // Below threshold each dB of input costs `ratio` dB of output
        let y1 = expansion_curve(-30.0, -20.0, 3.0, 0.0);
        let y2 = expansion_curve(-31.0, -20.0, 3.0, 0.0);
        assert!((y1 - (-50.0)).abs() < 1e-3);
        assert!((y1 - y2 - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_curve_knee_is_continuous() {
        let (thr, ratio, knee) = (-20.0, 4.0, 6.0);

        // The knee blend must meet both branches at its edges
        let at_low = expansion_curve(thr - knee, thr, ratio, knee);
        let just_inside_low = expansion_curve(thr - knee + 1e-3, thr, ratio, knee);
        assert!((at_low - just_inside_low).abs() < 1e-2);

        let at_high = expansion_curve(thr + knee, thr, ratio, knee);
        let just_inside_high = expansion_curve(thr + knee - 1e-3, thr, ratio, knee);
        assert!((at_high - just_inside_high).abs() < 1e-2);
    }

    #[test]
    fn test_above_threshold_no_reduction() {
        let mut exp = make_expander();
        let mut gain_db = -1.0;
        for _ in 0..100 {
            gain_db = exp.expand(-10.0);
        }
        assert_eq!(gain_db, 0.0, "Level above threshold gets no reduction");
        assert_eq!(exp.gain(), 1.0);
    }

    #[test]
    fn test_below_threshold_settles_on_upper_curve() {
        let mut exp = make_expander();
        let mut gain_db = 0.0;
        for _ in 0..100 {
            gain_db = exp.expand(-60.0);
        }
        // Upper curve gain: (x - thr) * (slope - 1) = -40 * 2 = -80 dB
        assert!(
            (gain_db - (-80.0)).abs() < 1e-3,
            "Constant sub-threshold level settles on the attack curve: {gain_db}"
        );
    }

    #[test]
    fn test_gain_floored_at_reduction() {
        let mut exp = make_expander();
        let mut gain_db = 0.0;
        for _ in 0..100 {
            gain_db = exp.expand(-140.0);
        }
        assert_eq!(
            gain_db, -100.0,
            "Gain must never exceed the configured reduction"
        );
    }

    #[test]
    fn test_input_clamped_at_reduction_floor() {
        let mut a = make_expander();
        let mut b = make_expander();
        for _ in 0..50 {
            a.expand(-100.0);
            b.expand(-130.0); // below the reduction floor, clamps to -100
        }
        assert_eq!(a.gain_db(), b.gain_db());
    }

    #[test]
    fn test_hysteresis_band_passes_small_rises() {
        let mut exp = make_expander();
        for _ in 0..100 {
            exp.expand(-60.0);
        }
        let settled = exp.gain_db();

        // Rising input inside the band: the delta propagates one-to-one,
        // so the gain stays put instead of chattering
        for step in 1..=8 {
            let gain_db = exp.expand(-60.0 + step as f32);
            assert!(
                (gain_db - settled).abs() < 1e-3,
                "Gain must hold inside the hysteresis band: {gain_db} vs {settled}"
            );
        }
    }

    #[test]
    fn test_falling_input_tracks_attack_curve() {
        let mut exp = make_expander();
        for _ in 0..100 {
            exp.expand(-40.0);
        }

        // Falling input presses against the upper curve immediately
        let gain_db = exp.expand(-50.0);
        assert!(
            (gain_db - (-60.0)).abs() < 1e-3,
            "Falling level follows the attack-side curve: {gain_db}"
        );
    }

    #[test]
    fn test_clear_resets_tracking() {
        let mut exp = make_expander();
        for _ in 0..100 {
            exp.expand(-60.0);
        }
        exp.clear();
        assert_eq!(exp.gain_db(), 0.0);
        assert_eq!(exp.gain(), 1.0);
    }
}
