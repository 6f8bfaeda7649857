// SPDX-License-Identifier: LGPL-3.0-or-later

//! Latching classifier over a noisy boolean signal.
//!
//! The boolean input is mapped to ±1 and smoothed by a one-pole filter;
//! the output latches to +1 once the smoothed value crosses `+latch`, to
//! −1 once it crosses `−latch`, and holds in between. This behaves like a
//! Schmitt trigger and debounces signals that flip for a few samples at a
//! time — the envelope follower feeds it "is the level rising" bits.

/// Hysteresis latch over a smoothed boolean signal.
///
/// The output is 0.0 (neutral) until the smoothed signal first crosses a
/// latch threshold, then always ±1.
#[derive(Debug, Clone)]
pub struct EmaLatch {
    alpha: f32,
    latch: f32,
    value: f32,
    current: f32,
}

impl EmaLatch {
    /// Create a latch.
    ///
    /// # Arguments
    /// * `alpha` - Smoothing coefficient of the internal one-pole filter
    /// * `latch` - Crossing threshold in (0, 1); larger means more debounce
    pub fn new(alpha: f32, latch: f32) -> Self {
        Self {
            alpha,
            latch,
            value: 0.0,
            current: 0.0,
        }
    }

    /// Reset smoothing state and output to neutral.
    pub fn clear(&mut self) {
        self.value = 0.0;
        self.current = 0.0;
    }

    /// The latched output without updating it.
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Push a boolean observation and return the latched output.
    #[inline]
    pub fn update(&mut self, input: bool) -> f32 {
        let sample = if input { 1.0 } else { -1.0 };
        self.value = sample * self.alpha + self.value * (1.0 - self.alpha);

        if self.value > self.latch {
            self.current = 1.0;
        }
        if self.value < -self.latch {
            self.current = -1.0;
        }

        self.current
    }
}
