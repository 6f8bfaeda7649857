// SPDX-License-Identifier: LGPL-3.0-or-later

//! Envelope follower producing a smooth loudness estimate.
//!
//! A pure filter chain, no state machine. Per sample:
//!
//! 1. Rectify the input.
//! 2. Band-limit to roughly 100 Hz – 2 kHz (one-pole high-pass, then a
//!    resonant two-pole low-pass); rectify again because the resonance
//!    can ring the signal slightly negative.
//! 3. Feed the band-limited value into an EMA (200 Hz) and an SMA (10 ms
//!    window) in parallel.
//! 4. Classify the trend with a latched "is the SMA level rising" bit.
//! 5. Combine: prefer the faster EMA on whichever side (up or down) the
//!    trend points, so attacks are not lagged and releases do not spike.
//! 6. Hold the running maximum of the combined value.
//! 7. Decay the hold by the SMA's own dB slope scaled by a fudge factor,
//!    clamped between a fixed slow decay (60 dB over 3 s) and the
//!    release-derived fast decay; force the fast decay once the hold has
//!    not been re-triggered for 10 ms.
//! 8. Smooth the hold through four cascaded one-pole low-passes (200 Hz).

use crate::consts::DECAY_FUDGE;
use crate::filters::{Filter, FilterType, OnePole, OnePoleType};
use crate::indicators::{Ema, EmaLatch, Sma};
use crate::units::{db_to_gain, lp_alpha, seconds_to_samples};

const INPUT_HP_CUTOFF_HZ: f32 = 100.0;
const INPUT_LP_CUTOFF_HZ: f32 = 2000.0;
const INPUT_LP_Q: f32 = 1.0;
const EMA_CUTOFF_HZ: f32 = 200.0;
const SMA_PERIOD_S: f32 = 0.01;
const TIMEOUT_PERIOD_S: f32 = 0.01;
const HOLD_SMOOTHER_HZ: f32 = 200.0;
const MOVEMENT_ALPHA: f32 = 0.005;
const MOVEMENT_LATCH: f32 = 0.2;
const SLOW_DECAY_S: f32 = 3.0;
const DECAY_RANGE_DB: f32 = 60.0;

/// Envelope follower with adaptive decay and peak hold.
///
/// [`process_sample`](EnvelopeFollower::process_sample) consumes raw audio
/// samples and returns a smoothed, non-negative envelope, also readable
/// via [`envelope`](EnvelopeFollower::envelope).
///
/// [`set_release`](EnvelopeFollower::set_release) recomputes only the
/// fast-decay constant and may be called between blocks at audio rate;
/// sample-rate changes go through
/// [`update_settings`](EnvelopeFollower::update_settings), which is the
/// only place that allocates.
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    sample_rate: f32,
    release_ms: f32,

    hp_filter: OnePole,
    input_filter: Filter,
    ema: Ema,
    sma: Sma,
    movement_latch: EmaLatch,

    timeout_samples: u32,
    slow_decay: f32,
    fast_decay: f32,
    hold_alpha: f32,

    hold: f32,
    last_trigger: u32,
    /// Cascaded smoothing stages.
    h: [f32; 4],
    envelope: f32,
    dirty: bool,
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeFollower {
    /// Create a follower with default settings.
    ///
    /// Defaults: 48 kHz, 100 ms release. Call
    /// [`update_settings`](EnvelopeFollower::update_settings) before
    /// processing.
    pub fn new() -> Self {
        Self {
            sample_rate: 48000.0,
            release_ms: 100.0,
            hp_filter: OnePole::new(),
            input_filter: Filter::new(),
            ema: Ema::new(0.0),
            sma: Sma::new(),
            movement_latch: EmaLatch::new(MOVEMENT_ALPHA, MOVEMENT_LATCH),
            timeout_samples: 0,
            slow_decay: 1.0,
            fast_decay: 1.0,
            hold_alpha: 0.0,
            hold: 0.0,
            last_trigger: 0,
            h: [0.0; 4],
            envelope: 0.0,
            dirty: true,
        }
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sr: f32) -> &mut Self {
        self.sample_rate = sr;
        self.dirty = true;
        self
    }

    /// Set the release time in milliseconds.
    ///
    /// Recomputes only the fast-decay constant; safe to call between
    /// blocks without disturbing any other state.
    pub fn set_release(&mut self, ms: f32) -> &mut Self {
        self.release_ms = ms;
        let db_per_sample = -DECAY_RANGE_DB / (self.release_ms / 1000.0 * self.sample_rate);
        self.fast_decay = db_to_gain(db_per_sample);
        self
    }

    /// Reconfigure filters and the SMA window after parameter changes.
    ///
    /// Allocates (SMA history); call at configuration time, not from a
    /// processing path.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let sr = self.sample_rate;
        let ts = 1.0 / sr;

        self.hp_filter
            .set_sample_rate(sr)
            .set_filter_type(OnePoleType::Highpass)
            .set_cutoff(INPUT_HP_CUTOFF_HZ)
            .update_settings();
        self.input_filter
            .set_sample_rate(sr)
            .set_filter_type(FilterType::Lowpass)
            .set_frequency(INPUT_LP_CUTOFF_HZ)
            .set_q(INPUT_LP_Q)
            .update_settings();

        self.ema = Ema::new(lp_alpha(EMA_CUTOFF_HZ, ts));
        self.sma
            .init(seconds_to_samples(sr, SMA_PERIOD_S) as usize);
        self.movement_latch = EmaLatch::new(MOVEMENT_ALPHA, MOVEMENT_LATCH);

        self.timeout_samples = seconds_to_samples(sr, TIMEOUT_PERIOD_S) as u32;
        self.slow_decay = db_to_gain(-DECAY_RANGE_DB / seconds_to_samples(sr, SLOW_DECAY_S));
        self.hold_alpha = lp_alpha(HOLD_SMOOTHER_HZ, ts);
        self.set_release(self.release_ms);

        self.clear();
    }

    /// Reset processing state without touching parameters.
    pub fn clear(&mut self) {
        self.hp_filter.clear();
        self.input_filter.clear();
        self.ema.clear();
        self.sma.clear();
        self.movement_latch.clear();
        self.hold = 0.0;
        self.last_trigger = 0;
        self.h = [0.0; 4];
        self.envelope = 0.0;
    }

    /// The current smoothed envelope, always non-negative.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Feed one sample and return the updated envelope.
    pub fn process_sample(&mut self, s: f32) -> f32 {
        let val = self.hp_filter.process_sample(s.abs());
        let band_limited = self.input_filter.process_sample(val).abs();

        let ema_value = self.ema.update(band_limited);
        let sma_value = self.sma.update(band_limited);

        // Debounced trend bit: is the windowed level generally rising?
        let movement = self
            .movement_latch
            .update(self.sma.db_decay_per_sample() > 0.0);

        // Prefer the faster EMA on the active side of the trend
        let combined = if movement > 0.0 {
            ema_value.max(sma_value)
        } else {
            ema_value.min(sma_value)
        };

        if combined > self.hold {
            self.hold = combined;
            self.last_trigger = 0;
        }

        // Track the signal's own decay rate, slightly accelerated so the
        // hold keeps bumping into the peaks; once the hold goes stale,
        // fall at the full release rate
        let mut decay = if self.last_trigger > self.timeout_samples {
            self.fast_decay
        } else {
            db_to_gain(self.sma.db_decay_per_sample() * DECAY_FUDGE)
        };
        // Two-sided limit, fast bound applied last: a release slower than
        // the fixed slow decay degrades to the fast rate instead of
        // inverting the bounds
        if decay > self.slow_decay {
            decay = self.slow_decay;
        }
        if decay < self.fast_decay {
            decay = self.fast_decay;
        }

        self.hold *= decay;

        self.h[0] = self.hold_alpha * self.hold + (1.0 - self.hold_alpha) * self.h[0];
        self.h[1] = self.hold_alpha * self.h[0] + (1.0 - self.hold_alpha) * self.h[1];
        self.h[2] = self.hold_alpha * self.h[1] + (1.0 - self.hold_alpha) * self.h[2];
        self.h[3] = self.hold_alpha * self.h[2] + (1.0 - self.hold_alpha) * self.h[3];

        self.envelope = self.h[3];
        self.last_trigger += 1;

        self.envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn make_follower(release_ms: f32) -> EnvelopeFollower {
        let mut env = EnvelopeFollower::new();
        env.set_sample_rate(48000.0).set_release(release_ms);
        env.update_settings();
        env
    }

    fn sine(i: usize, freq: f32, sr: f32) -> f32 {
        (i as f32 / sr * 2.0 * PI * freq).sin()
    }

    #[test]
    fn test_silence_keeps_envelope_at_zero() {
        let mut env = make_follower(100.0);
        for _ in 0..1000 {
            env.process_sample(0.0);
        }
        assert_eq!(env.envelope(), 0.0);
    }

    #[test]
    fn test_envelope_is_nonnegative() {
        let mut env = make_follower(100.0);
        for i in 0..10000 {
            let x = sine(i, 300.0, 48000.0) * if i % 7 == 0 { -1.3 } else { 0.8 };
            let out = env.process_sample(x);
            assert!(out >= 0.0, "Envelope must never go negative: {out}");
        }
    }

    #[test]
    fn test_tracks_full_scale_sine_burst() {
        let mut env = make_follower(100.0);
        let mut out = 0.0;
        for i in 0..9600 {
            out = env.process_sample(sine(i, 300.0, 48000.0));
        }
        assert!(
            out > 0.1,
            "Follower should register a full-scale in-band tone: {out}"
        );
        assert!(out < 1.0, "Envelope of a unit sine stays below unity: {out}");
    }

    #[test]
    fn test_decays_to_silence_after_burst() {
        let mut env = make_follower(100.0);
        for i in 0..9600 {
            env.process_sample(sine(i, 300.0, 48000.0));
        }
        assert!(env.envelope() > 0.1);

        for _ in 0..24000 {
            env.process_sample(0.0);
        }
        assert!(
            env.envelope() < 1e-3,
            "Envelope should fall off after the signal stops: {}",
            env.envelope()
        );
    }

    #[test]
    fn test_release_time_controls_decay_speed() {
        let mut fast = make_follower(50.0);
        let mut slow = make_follower(500.0);

        for i in 0..9600 {
            let x = sine(i, 300.0, 48000.0);
            fast.process_sample(x);
            slow.process_sample(x);
        }
        for _ in 0..4800 {
            fast.process_sample(0.0);
            slow.process_sample(0.0);
        }
        assert!(
            fast.envelope() < slow.envelope(),
            "Shorter release must decay faster: fast={}, slow={}",
            fast.envelope(),
            slow.envelope()
        );
    }

    #[test]
    fn test_out_of_band_rumble_is_rejected() {
        let mut in_band = make_follower(100.0);
        let mut rumble = make_follower(100.0);

        let mut in_band_out = 0.0;
        let mut rumble_out = 0.0;
        for i in 0..19200 {
            in_band_out = in_band.process_sample(sine(i, 300.0, 48000.0));
            // 10 Hz, well below the 100 Hz detector high-pass
            rumble_out = rumble.process_sample(sine(i, 10.0, 48000.0));
        }
        assert!(
            rumble_out < in_band_out * 0.5,
            "Sub-bass rumble should read much weaker than an in-band tone: \
             rumble={rumble_out}, in_band={in_band_out}"
        );
    }

    #[test]
    fn test_release_slower_than_slow_decay_stays_finite() {
        // A release longer than the fixed 3 s slow decay inverts the
        // decay bounds; the follower must keep working instead of
        // rejecting the configuration
        let mut env = make_follower(4000.0);
        let mut out = 0.0;
        for i in 0..9600 {
            out = env.process_sample(sine(i, 300.0, 48000.0));
            assert!(out.is_finite() && out >= 0.0);
        }
        assert!(out > 0.1, "Follower must still track the signal: {out}");

        for _ in 0..48000 {
            let y = env.process_sample(0.0);
            assert!(y.is_finite() && y >= 0.0);
        }
        assert!(
            env.envelope() < 0.1,
            "Envelope must still decay with an extreme release: {}",
            env.envelope()
        );
    }

    #[test]
    fn test_clear_resets_state() {
        let mut env = make_follower(100.0);
        for i in 0..4800 {
            env.process_sample(sine(i, 300.0, 48000.0));
        }
        env.clear();
        assert_eq!(env.envelope(), 0.0);
        assert_eq!(env.process_sample(0.0), 0.0);
    }
}
