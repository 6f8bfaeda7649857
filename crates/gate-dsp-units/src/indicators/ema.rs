// SPDX-License-Identifier: LGPL-3.0-or-later

//! One-pole exponential moving average.

/// Exponential moving average with a fixed coefficient.
///
/// `update(x)` computes `alpha * x + (1 - alpha) * previous` and returns
/// the new value. The coefficient is fixed at construction; derive it
/// from a cutoff with [`lp_alpha`](crate::units::lp_alpha).
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f32,
    value: f32,
}

impl Ema {
    /// Create an average with the given smoothing coefficient.
    pub fn new(alpha: f32) -> Self {
        Self { alpha, value: 0.0 }
    }

    /// Reset the average to zero.
    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    /// The current average without updating it.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Push a sample and return the new average.
    #[inline]
    pub fn update(&mut self, sample: f32) -> f32 {
        self.value = sample * self.alpha + self.value * (1.0 - self.alpha);
        self.value
    }
}
