// SPDX-License-Identifier: LGPL-3.0-or-later

//! Control-signal utilities.

pub mod slew;

pub use slew::SlewLimiter;
