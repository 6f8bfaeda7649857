// SPDX-License-Identifier: LGPL-3.0-or-later

//! # gate-dsp-units
//!
//! Real-time noise gate / downward expander processing units.
//!
//! The crate is built around a per-sample control loop that turns a raw
//! detector signal into a time-varying gain and applies it to attenuate
//! noise between wanted signal bursts:
//!
//! - **Meters**: windowed peak-hold detector with decay fallback
//! - **Indicators**: SMA, EMA and latching-EMA streaming estimators
//! - **Dynamics**: envelope follower, dual-slope expander, gate kernel
//! - **Control**: dB-domain slew limiter
//! - **Filters**: RBJ biquad and one-pole filters for band-limiting
//!
//! All units are single-threaded and realtime-safe: buffers are sized at
//! configuration time and processing never allocates. Parameters follow a
//! builder pattern; call `update_settings()` after changing them and
//! before the next processed block.
//!
//! ## Example
//!
//! ```
//! use gate_dsp_units::dynamics::gate::NoiseGate;
//!
//! let mut gate = NoiseGate::new();
//! gate.set_sample_rate(48000.0)
//!     .set_threshold(-20.0)
//!     .set_reduction(-100.0)
//!     .set_slope(3.0)
//!     .set_release(100.0)
//!     .update_settings();
//!
//! let input = vec![0.0f32; 256];
//! let mut output = vec![0.0f32; 256];
//! gate.process(&mut output, &input, None);
//! ```

// Foundational modules
pub mod consts;
pub mod float;
pub mod units;

// Processing units
pub mod ctl;
pub mod dynamics;
pub mod filters;
pub mod indicators;
pub mod meters;
pub mod util;
