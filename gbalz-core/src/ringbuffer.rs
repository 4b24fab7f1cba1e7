//! Ring buffer (sliding window) for LZ10/LZ11 decompression.
//!
//! The streaming decoder keeps only the most recent output bytes around:
//! back-references in the BIOS formats never reach further than 4096 bytes,
//! so a 4 KB window is enough no matter how large the output grows.

use crate::error::{GbaLzError, Result};

/// Window size for the GBA/NDS BIOS LZ formats (4 KB).
pub const GBA_LZ_WINDOW: usize = 4096;

/// A ring buffer (circular buffer) for maintaining decompression history.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    /// The underlying buffer.
    buffer: Vec<u8>,
    /// Current write position (next byte will be written here).
    position: usize,
    /// Number of bytes written (up to capacity).
    size: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
}

impl RingBuffer {
    /// Create a new ring buffer with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of 2 or is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        assert!(
            capacity.is_power_of_two(),
            "Capacity must be a power of 2, got {}",
            capacity
        );

        Self {
            buffer: vec![0; capacity],
            position: 0,
            size: 0,
            mask: capacity - 1,
        }
    }

    /// Create a ring buffer sized for LZ10/LZ11 history.
    pub fn gba_lz() -> Self {
        Self::new(GBA_LZ_WINDOW)
    }

    /// Write a single byte to the buffer.
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
        if self.size < self.buffer.len() {
            self.size += 1;
        }
    }

    /// Read a byte at the given distance from the current position.
    ///
    /// Distance 1 means the most recently written byte.
    pub fn read_at_distance(&self, distance: usize) -> Result<u8> {
        if distance == 0 || distance > self.size {
            return Err(GbaLzError::invalid_distance(distance, self.size));
        }

        let index = (self.position.wrapping_sub(distance)) & self.mask;
        Ok(self.buffer[index])
    }

    /// Re-emit the byte at `distance` as the newest byte and return it.
    ///
    /// Calling this `length` times expands an LZ back-reference, including
    /// overlapping ones where `length > distance`.
    pub fn repeat_at_distance(&mut self, distance: usize) -> Result<u8> {
        let byte = self.read_at_distance(distance)?;
        self.write_byte(byte);
        Ok(byte)
    }
}
