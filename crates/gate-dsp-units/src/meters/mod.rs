// SPDX-License-Identifier: LGPL-3.0-or-later

//! Signal level meters.

pub mod peak;

pub use peak::PeakDetector;
