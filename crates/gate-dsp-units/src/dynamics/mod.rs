// SPDX-License-Identifier: LGPL-3.0-or-later

//! Dynamics processing units: envelope follower, expander, noise gate.

pub mod envelope;
pub mod expander;
pub mod gate;

pub use envelope::EnvelopeFollower;
pub use expander::{Expander, expansion_curve};
pub use gate::NoiseGate;
