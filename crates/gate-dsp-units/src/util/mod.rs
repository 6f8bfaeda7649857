// SPDX-License-Identifier: LGPL-3.0-or-later

//! Support utilities for the processing units.

pub mod ring_buffer;

pub use ring_buffer::RingBuffer;
