// SPDX-License-Identifier: LGPL-3.0-or-later

//! Filters used for detector band-limiting.
//!
//! - [`biquad::Filter`]: second-order RBJ filter with parameter management
//! - [`one_pole::OnePole`]: first-order low-pass / high-pass
//! - [`coeffs`]: biquad coefficient calculation

pub mod biquad;
pub mod coeffs;
pub mod one_pole;

pub use biquad::Filter;
pub use coeffs::FilterType;
pub use one_pole::{OnePole, OnePoleType};
