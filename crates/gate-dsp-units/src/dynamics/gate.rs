// SPDX-License-Identifier: LGPL-3.0-or-later

//! Noise gate: the full detector-to-gain pipeline.
//!
//! Per sample, the detector signal (a sidechain if provided, otherwise
//! the main input) runs through the envelope follower; the envelope is
//! converted to dB, expanded into a target gain, slew-limited, converted
//! back to linear and multiplied onto the main input.
//!
//! Parameter setters are plain field writes and may race with a running
//! block by at most one block of staleness; `update_settings()` applies
//! them before the next block. No allocation or locking happens inside
//! `process`.

use crate::consts::SIGNAL_FLOOR_DB;
use crate::ctl::SlewLimiter;
use crate::dynamics::{EnvelopeFollower, Expander};
use crate::float::{DenormalGuard, sanitize};
use crate::units::{db_to_gain, gain_to_db};

bitflags::bitflags! {
    /// Gate state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Flags: u8 {
        /// Gate is active; cleared means passthrough.
        const ENABLED = 1 << 0;
        /// Parameters changed, settings update pending.
        const UPDATE = 1 << 1;
    }
}

/// Noise gate (downward expander) processor.
///
/// # Examples
///
/// ```
/// use gate_dsp_units::dynamics::NoiseGate;
///
/// let mut gate = NoiseGate::new();
/// gate.set_sample_rate(48000.0)
///     .set_threshold(-20.0)
///     .set_reduction(-100.0)
///     .set_slope(3.0)
///     .set_release(100.0)
///     .update_settings();
///
/// let input = vec![0.0f32; 512];
/// let mut output = vec![0.0f32; 512];
/// gate.process(&mut output, &input, None);
/// ```
#[derive(Debug, Clone)]
pub struct NoiseGate {
    sample_rate: f32,
    threshold_db: f32,
    reduction_db: f32,
    slope: f32,
    attack_ms: f32,
    release_ms: f32,
    detector_gain_db: f32,
    output_gain_db: f32,

    detector_gain: f32,
    output_gain: f32,
    flags: Flags,

    envelope: EnvelopeFollower,
    expander: Expander,
    slew: SlewLimiter,

    gain_db: f32,
}

impl Default for NoiseGate {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseGate {
    /// Create a gate with default settings.
    ///
    /// Defaults: 48 kHz, −20 dB threshold, −150 dB reduction, slope 3,
    /// 10 ms attack, 100 ms release, unity detector and output gains,
    /// enabled. Call [`update_settings`](NoiseGate::update_settings)
    /// before processing.
    pub fn new() -> Self {
        Self {
            sample_rate: 48000.0,
            threshold_db: -20.0,
            reduction_db: -150.0,
            slope: 3.0,
            attack_ms: 10.0,
            release_ms: 100.0,
            detector_gain_db: 0.0,
            output_gain_db: 0.0,
            detector_gain: 1.0,
            output_gain: 1.0,
            flags: Flags::ENABLED | Flags::UPDATE,
            envelope: EnvelopeFollower::new(),
            expander: Expander::new(),
            slew: SlewLimiter::new(),
            gain_db: 0.0,
        }
    }

    /// Set the sample rate in Hz.
    ///
    /// Reconfigures every sub-unit on the next
    /// [`update_settings`](NoiseGate::update_settings), which also resets
    /// processing state.
    pub fn set_sample_rate(&mut self, sr: f32) -> &mut Self {
        self.sample_rate = sr;
        self.envelope.set_sample_rate(sr);
        self.slew.set_sample_rate(sr);
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Set the threshold in dB below which the gate closes.
    pub fn set_threshold(&mut self, db: f32) -> &mut Self {
        self.threshold_db = db;
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Set the maximum gain reduction in dB (a negative value).
    pub fn set_reduction(&mut self, db: f32) -> &mut Self {
        self.reduction_db = db;
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Set the expansion slope.
    pub fn set_slope(&mut self, slope: f32) -> &mut Self {
        self.slope = slope;
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Set the attack time in milliseconds (bounds how fast the gate opens).
    pub fn set_attack(&mut self, ms: f32) -> &mut Self {
        self.attack_ms = ms;
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Set the release time in milliseconds (bounds how fast the gate closes).
    pub fn set_release(&mut self, ms: f32) -> &mut Self {
        self.release_ms = ms;
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Set the gain applied to the detector signal, in dB.
    pub fn set_detector_gain(&mut self, db: f32) -> &mut Self {
        self.detector_gain_db = db;
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Set the gain applied to the gated output, in dB.
    pub fn set_output_gain(&mut self, db: f32) -> &mut Self {
        self.output_gain_db = db;
        self.flags.insert(Flags::UPDATE);
        self
    }

    /// Enable or disable the gate. Disabled, `process` copies the input
    /// through untouched.
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(Flags::ENABLED, enabled);
        self
    }

    /// Whether the gate is active.
    pub fn enabled(&self) -> bool {
        self.flags.contains(Flags::ENABLED)
    }

    /// Push pending parameter changes into the sub-units.
    ///
    /// Must be called after any setter, before the next block. May
    /// allocate (envelope SMA window) when the sample rate changed.
    pub fn update_settings(&mut self) {
        if !self.flags.contains(Flags::UPDATE) {
            return;
        }
        self.flags.remove(Flags::UPDATE);

        self.expander
            .set_threshold(self.threshold_db)
            .set_reduction(self.reduction_db)
            .set_slope(self.slope)
            .update_settings();

        self.envelope.set_release(self.release_ms);
        self.envelope.update_settings();

        self.slew
            .set_slew_up(self.attack_ms)
            .set_slew_down(self.release_ms)
            .update_settings();

        self.detector_gain = db_to_gain(self.detector_gain_db);
        self.output_gain = db_to_gain(self.output_gain_db);
    }

    /// Reset processing state without touching parameters.
    pub fn clear(&mut self) {
        self.envelope.clear();
        self.expander.clear();
        self.slew.reset_to(0.0);
        self.gain_db = 0.0;
    }

    /// The gain applied to the most recent sample, in dB. For metering.
    pub fn current_gain_db(&self) -> f32 {
        self.gain_db
    }

    /// The current envelope level of the detector signal. For metering.
    pub fn envelope(&self) -> f32 {
        self.envelope.envelope()
    }

    /// Process a block of audio from `src` into `dst`.
    ///
    /// The detector runs on `sidechain` when given, otherwise on `src`.
    /// Block length is the shortest of the supplied slices; zero length
    /// is a no-op.
    pub fn process(&mut self, dst: &mut [f32], src: &[f32], sidechain: Option<&[f32]>) {
        let mut n = dst.len().min(src.len());
        if let Some(sc) = sidechain {
            n = n.min(sc.len());
        }

        if !self.flags.contains(Flags::ENABLED) {
            dst[..n].copy_from_slice(&src[..n]);
            return;
        }

        // Decaying gate state spends a long time near zero
        let _guard = DenormalGuard::new();

        for i in 0..n {
            // A NaN or infinity reaching the recursive envelope filters
            // would lodge there permanently; flush it at the input
            let det = sanitize(match sidechain {
                Some(sc) => sc[i],
                None => src[i],
            }) * self.detector_gain;

            let env = self.envelope.process_sample(det);
            let env_db = gain_to_db(env).max(SIGNAL_FLOOR_DB);

            let target_db = self.expander.expand(env_db);
            self.gain_db = self.slew.process(target_db);

            dst[i] = src[i] * db_to_gain(self.gain_db) * self.output_gain;
        }
    }
}
