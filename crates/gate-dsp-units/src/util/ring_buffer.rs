// SPDX-License-Identifier: LGPL-3.0-or-later

//! Power-of-two circular buffer with bitmask indexing.
//!
//! Backs the SMA history window: the write head advances on each push and
//! past samples are addressed relative to it. Capacity is rounded up to a
//! power of two so modular indexing is a bitmask instead of a division.
//!
//! # Examples
//! ```
//! use gate_dsp_units::util::RingBuffer;
//!
//! let mut rb = RingBuffer::new();
//! rb.init(480);
//! rb.push(1.0);
//! rb.push(2.0);
//! assert_eq!(rb.get(0), 2.0); // most recent
//! assert_eq!(rb.get(1), 1.0); // one sample back
//! ```
#[derive(Debug, Clone)]
pub struct RingBuffer {
    /// Internal storage (length is always a power of two).
    buffer: Vec<f32>,
    /// Write position (head).
    head: usize,
    /// Bitmask for modular indexing (`size - 1`).
    mask: usize,
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RingBuffer {
    /// Create a new empty ring buffer (no storage allocated).
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            head: 0,
            mask: 0,
        }
    }

    /// Initialize the buffer with at least the given capacity.
    ///
    /// The actual capacity is rounded up to the next power of two and all
    /// samples are zeroed. This is the only allocating operation; it must
    /// not be called from a processing path.
    pub fn init(&mut self, capacity: usize) {
        let size = capacity.next_power_of_two().max(1);
        self.buffer = vec![0.0; size];
        self.mask = size - 1;
        self.head = 0;
    }

    /// Return the allocated capacity (always a power of two).
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Zero the contents without reallocating.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.head = 0;
    }

    /// Push a single sample, advancing the write head.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        if self.buffer.is_empty() {
            return;
        }
        self.buffer[self.head] = sample;
        self.head = (self.head + 1) & self.mask;
    }

    /// Read the sample `offset` positions behind the write head.
    ///
    /// Offset 0 is the most recently written sample. Returns 0.0 if the
    /// buffer was never initialized.
    #[inline]
    pub fn get(&self, offset: usize) -> f32 {
        if self.buffer.is_empty() {
            return 0.0;
        }
        let idx = (self.head.wrapping_sub(1).wrapping_sub(offset)) & self.mask;
        self.buffer[idx]
    }
}
