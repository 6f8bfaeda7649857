// SPDX-License-Identifier: LGPL-3.0-or-later

//! Windowed peak-hold detector with exponential decay fallback.
//!
//! # Algorithm
//!
//! 1. When the input just decreased, the previous sample was a local peak;
//!    it is recorded as a (time, magnitude) pair in a circular buffer.
//! 2. On every call the in-window records are scanned for their maximum;
//!    records older than the hold window are dropped lazily by advancing
//!    the read pointer.
//! 3. A fallback value decays geometrically from the current output but
//!    never falls below the instantaneous input.
//! 4. The output is the in-window maximum if it beats the fallback,
//!    otherwise the fallback.
//!
//! The result is a peak-hold meter that rides the tops of the signal for
//! the duration of the hold window and then decays smoothly.
//!
//! # Examples
//!
//! ```
//! use gate_dsp_units::meters::PeakDetector;
//!
//! let mut det = PeakDetector::new();
//! det.set_sample_rate(48000.0).update_settings();
//!
//! let peak = det.process_peaks(0.5);
//! assert!(peak >= 0.5);
//! ```

use crate::consts::{PEAK_DECAY_DFL, PEAK_HOLD_MS_DFL};
use crate::units::millis_to_samples;

/// A recorded local peak: the tick it occurred at and its magnitude.
#[derive(Debug, Clone, Copy, Default)]
struct PeakRecord {
    time: u64,
    value: f32,
}

/// Peak-hold detector with decay fallback.
///
/// Expects non-negative magnitudes. The output never falls below the
/// instantaneous input and decays geometrically (default 0.995 per
/// sample) once the hold window holds no active peak.
#[derive(Debug, Clone)]
pub struct PeakDetector {
    sample_rate: f32,
    decay: f32,
    peak_hold_ms: f32,

    /// Circular peak storage; capacity equals the hold window in samples.
    records: Vec<PeakRecord>,
    read_index: usize,
    write_index: usize,

    prev_value: f32,
    time_index: u64,
    current: f32,
    dirty: bool,
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PeakDetector {
    /// Create a detector with default settings.
    ///
    /// Defaults: 48 kHz, 0.995 decay per sample, 10 ms peak hold.
    pub fn new() -> Self {
        Self {
            sample_rate: 48000.0,
            decay: PEAK_DECAY_DFL,
            peak_hold_ms: PEAK_HOLD_MS_DFL,
            records: Vec::new(),
            read_index: 0,
            write_index: 0,
            prev_value: 0.0,
            time_index: 0,
            current: 0.0,
            dirty: true,
        }
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sr: f32) -> &mut Self {
        self.sample_rate = sr;
        self.dirty = true;
        self
    }

    /// Set the per-sample geometric decay of the fallback value.
    pub fn set_decay(&mut self, decay: f32) -> &mut Self {
        self.decay = decay;
        self.dirty = true;
        self
    }

    /// Set the peak hold window in milliseconds.
    pub fn set_peak_hold(&mut self, ms: f32) -> &mut Self {
        self.peak_hold_ms = ms;
        self.dirty = true;
        self
    }

    /// Reallocate the peak window after parameter changes.
    ///
    /// Allocates; call at configuration time, not from a processing path.
    pub fn update_settings(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let window = millis_to_samples(self.sample_rate, self.peak_hold_ms) as usize;
        self.records = vec![PeakRecord::default(); window.max(1)];
        self.clear();
    }

    /// Reset detection state without touching parameters.
    pub fn clear(&mut self) {
        self.read_index = 0;
        self.write_index = 0;
        self.prev_value = 0.0;
        self.time_index = 0;
        self.current = 0.0;
    }

    /// The most recent output value.
    pub fn value(&self) -> f32 {
        self.current
    }

    /// The hold window length in samples.
    pub fn window_len(&self) -> usize {
        self.records.len()
    }

    /// Feed one sample and return the current peak value.
    pub fn process_peaks(&mut self, val: f32) -> f32 {
        let window = self.records.len() as u64;

        // The previous sample was a local maximum; record it. With no
        // window allocated yet, only the decay fallback below applies
        if val < self.prev_value && !self.records.is_empty() {
            self.records[self.write_index] = PeakRecord {
                time: self.time_index,
                value: self.prev_value,
            };
            self.write_index = (self.write_index + 1) % self.records.len();
        }

        // Scan the in-window records for the maximum, lazily dropping
        // stale ones by advancing the read pointer
        let min_time = self.time_index.saturating_sub(window);
        let mut max_peak = 0.0f32;
        let mut found_peak = false;
        let mut read_idx = self.read_index;
        while read_idx != self.write_index {
            let record = self.records[read_idx];
            if record.time < min_time {
                self.read_index = (self.read_index + 1) % self.records.len();
            } else if !found_peak || record.value > max_peak {
                max_peak = record.value;
                found_peak = true;
            }
            read_idx = (read_idx + 1) % self.records.len();
        }

        // Decay fallback, never below the instantaneous input
        let fallback = (self.current * self.decay).max(val);

        self.current = if found_peak && max_peak > fallback {
            max_peak
        } else {
            fallback
        };

        self.prev_value = val;
        self.time_index += 1;

        self.current
    }
}
