// SPDX-License-Identifier: LGPL-3.0-or-later

//! Simple moving average with a decay-rate estimate.
//!
//! Besides the windowed mean, [`Sma`] reports the per-sample dB slope
//! between the newest sample and the one it just evicted. The envelope
//! follower uses that slope to set its adaptive decay rate.

use crate::consts::SIGNAL_FLOOR_DB;
use crate::units::gain_to_db;
use crate::util::RingBuffer;

/// Simple moving average over a fixed window of samples.
///
/// The running sum is kept in f64 so that evicted values cancel exactly
/// and the mean does not drift over long streams.
///
/// # Examples
///
/// ```
/// use gate_dsp_units::indicators::Sma;
///
/// let mut sma = Sma::new();
/// sma.init(4);
/// sma.update(1.0);
/// let mean = sma.update(1.0);
/// assert!((mean - 0.5).abs() < 1e-6); // two of four slots filled
/// ```
#[derive(Debug, Clone)]
pub struct Sma {
    history: RingBuffer,
    sample_count: usize,
    sum: f64,
    db_decay_per_sample: f32,
}

impl Default for Sma {
    fn default() -> Self {
        Self::new()
    }
}

impl Sma {
    /// Create an empty average; call [`init`](Sma::init) before use.
    pub fn new() -> Self {
        Self {
            history: RingBuffer::new(),
            sample_count: 0,
            sum: 0.0,
            db_decay_per_sample: 0.0,
        }
    }

    /// Allocate the history window for `sample_count` samples.
    ///
    /// Allocates; must not be called from a processing path.
    pub fn init(&mut self, sample_count: usize) {
        self.sample_count = sample_count.max(1);
        self.history.init(self.sample_count);
        self.sum = 0.0;
        self.db_decay_per_sample = 0.0;
    }

    /// Window length in samples.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Zero the window contents without reallocating.
    pub fn clear(&mut self) {
        self.history.clear();
        self.sum = 0.0;
        self.db_decay_per_sample = 0.0;
    }

    /// The per-sample dB slope of the window, from the last update.
    ///
    /// Positive while the windowed level is rising, negative while it is
    /// falling. Both endpoints are floored at −150 dB before subtracting,
    /// so silence reads as a zero slope rather than `-inf`.
    pub fn db_decay_per_sample(&self) -> f32 {
        self.db_decay_per_sample
    }

    /// Push a sample, evicting the oldest, and return the window mean.
    ///
    /// Returns 0.0 until [`init`](Sma::init) has allocated a window.
    #[inline]
    pub fn update(&mut self, sample: f32) -> f32 {
        if self.sample_count == 0 {
            return 0.0;
        }
        let evicted = self.history.get(self.sample_count - 1);
        self.history.push(sample);

        self.sum -= evicted as f64;
        self.sum += sample as f64;

        let sample_db = gain_to_db(sample).max(SIGNAL_FLOOR_DB);
        let evicted_db = gain_to_db(evicted).max(SIGNAL_FLOOR_DB);
        self.db_decay_per_sample = (sample_db - evicted_db) / self.sample_count as f32;

        (self.sum / self.sample_count as f64) as f32
    }
}
