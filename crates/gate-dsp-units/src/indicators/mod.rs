// SPDX-License-Identifier: LGPL-3.0-or-later

//! Streaming level estimators used by the envelope follower.
//!
//! - [`Sma`]: simple moving average with a dB decay-rate estimate
//! - [`Ema`]: one-pole exponential moving average
//! - [`EmaLatch`]: Schmitt-trigger style debouncer over a boolean signal

pub mod ema;
pub mod latch;
pub mod sma;

pub use ema::Ema;
pub use latch::EmaLatch;
pub use sma::Sma;
