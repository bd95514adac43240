//! Fixed-width binary genes.
//!
//! A [`Gene`] is an opaque blob of `N` raw bytes. The engine never knows
//! what the bits mean: problem encodings read and write typed fields through
//! the byte-offset accessors, while selection, crossover, and mutation only
//! ever address individual bits.
//!
//! # Bit numbering
//!
//! Bit `b` lives in byte `b >> 3` at position `7 - (b & 7)`, so bit 0 is the
//! most-significant bit of byte 0 and bit `8N - 1` is the least-significant
//! bit of the last byte.

use std::fmt;

/// A fixed-size binary candidate solution.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::Gene;
///
/// let mut gene = Gene::zeroed(2);
/// gene.set_bit(0, true);
/// gene.set_bit(15, true);
/// assert_eq!(gene.as_bytes(), &[0x80, 0x01]);
/// assert!(gene.get_bit(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gene {
    bytes: Vec<u8>,
}

impl Gene {
    /// Creates an all-zero gene of `width` bytes.
    pub fn zeroed(width: usize) -> Self {
        Self {
            bytes: vec![0; width],
        }
    }

    /// Wraps existing bytes as a gene.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Width in bytes.
    pub fn width(&self) -> usize {
        self.bytes.len()
    }

    /// Number of addressable bits (`8 * width`).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() << 3
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Returns the bit at `offset`.
    ///
    /// # Panics
    /// Panics if `offset >= self.bit_len()`.
    pub fn get_bit(&self, offset: usize) -> bool {
        let (byte, mask) = locate(offset);
        self.bytes[byte] & mask != 0
    }

    /// Sets the bit at `offset` to `value`.
    ///
    /// # Panics
    /// Panics if `offset >= self.bit_len()`.
    pub fn set_bit(&mut self, offset: usize, value: bool) {
        let (byte, mask) = locate(offset);
        if value {
            self.bytes[byte] |= mask;
        } else {
            self.bytes[byte] &= !mask;
        }
    }

    /// Inverts the bit at `offset`.
    ///
    /// # Panics
    /// Panics if `offset >= self.bit_len()`.
    pub fn flip_bit(&mut self, offset: usize) {
        let (byte, mask) = locate(offset);
        self.bytes[byte] ^= mask;
    }

    /// One-point crossover with `partner` at bit `offset`.
    ///
    /// Everything before `offset` stays in place; every bit at or after
    /// `offset` is exchanged between the two genes. Inside the byte that
    /// holds `offset` the exchange goes through a mask, the remaining bytes
    /// are swapped whole.
    ///
    /// - `offset == 0` swaps the genes entirely.
    /// - `offset >= bit_len()` leaves both untouched.
    ///
    /// Crossing twice at the same offset restores the original pair.
    ///
    /// # Panics
    /// Panics if the two genes have different widths.
    pub fn cross_at(&mut self, offset: usize, partner: &mut Gene) {
        assert_eq!(
            self.bytes.len(),
            partner.bytes.len(),
            "crossover partners must have equal width"
        );

        let byte = offset >> 3;
        if byte >= self.bytes.len() {
            return;
        }

        // Low bits of the byte, i.e. positions >= offset in MSB-first order.
        let tail = 0xFFu8 >> (offset & 7);
        let mine = self.bytes[byte];
        let theirs = partner.bytes[byte];
        self.bytes[byte] = (mine & !tail) | (theirs & tail);
        partner.bytes[byte] = (theirs & !tail) | (mine & tail);

        self.bytes[byte + 1..].swap_with_slice(&mut partner.bytes[byte + 1..]);
    }

    /// Reads a little-endian `i32` starting at byte `at`.
    ///
    /// # Panics
    /// Panics if `at + 4 > width`.
    pub fn read_i32(&self, at: usize) -> i32 {
        i32::from_le_bytes(self.word(at))
    }

    /// Writes `value` as a little-endian `i32` starting at byte `at`.
    pub fn write_i32(&mut self, at: usize, value: i32) {
        self.bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Reads a little-endian `u32` starting at byte `at`.
    pub fn read_u32(&self, at: usize) -> u32 {
        u32::from_le_bytes(self.word(at))
    }

    /// Writes `value` as a little-endian `u32` starting at byte `at`.
    pub fn write_u32(&mut self, at: usize, value: u32) {
        self.bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn word(&self, at: usize) -> [u8; 4] {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.bytes[at..at + 4]);
        buf
    }
}

impl From<Vec<u8>> for Gene {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::LowerHex for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bytes {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:x}")
    }
}

/// Byte index and single-bit mask for a bit offset (MSB-first).
#[inline]
fn locate(offset: usize) -> (usize, u8) {
    (offset >> 3, 0x80u8 >> (offset & 7))
}
