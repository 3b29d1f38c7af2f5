//! Width-generic integer encoding and alignment arithmetic.
//!
//! Pointer fields have a configurable width of 1 to 8 bytes, so encoding works
//! on the low `width` bytes of a `u64` rather than on fixed Rust integer types.

use crate::Endian;

impl Endian {
    /// Append the low `width` bytes of `value` in this byte order.
    pub fn put_uint(self, out: &mut Vec<u8>, value: u64, width: usize) {
        debug_assert!(width <= 8, "integer width {width} exceeds 8 bytes");
        match self {
            Endian::Big => out.extend_from_slice(&value.to_be_bytes()[8 - width..]),
            Endian::Little => out.extend_from_slice(&value.to_le_bytes()[..width]),
        }
    }

    /// Overwrite `dst` with the low `dst.len()` bytes of `value`.
    pub fn patch_uint(self, dst: &mut [u8], value: u64) {
        let width = dst.len();
        debug_assert!(width <= 8, "integer width {width} exceeds 8 bytes");
        match self {
            Endian::Big => dst.copy_from_slice(&value.to_be_bytes()[8 - width..]),
            Endian::Little => dst.copy_from_slice(&value.to_le_bytes()[..width]),
        }
    }

    /// Read an unsigned integer spanning all of `src`.
    pub fn read_uint(self, src: &[u8]) -> u64 {
        let width = src.len();
        debug_assert!(width <= 8, "integer width {width} exceeds 8 bytes");
        let mut bytes = [0u8; 8];
        match self {
            Endian::Big => {
                bytes[8 - width..].copy_from_slice(src);
                u64::from_be_bytes(bytes)
            }
            Endian::Little => {
                bytes[..width].copy_from_slice(src);
                u64::from_le_bytes(bytes)
            }
        }
    }

    /// Read a two's-complement integer spanning all of `src`, sign-extended.
    pub fn read_int(self, src: &[u8]) -> i64 {
        let width = src.len();
        if width == 0 {
            return 0;
        }
        let shift = 64 - width as u32 * 8;
        ((self.read_uint(src) << shift) as i64) >> shift
    }
}

/// Whether `value` is a non-zero power of two.
#[inline]
pub fn is_power_of_two(value: usize) -> bool {
    value != 0 && value & (value - 1) == 0
}

/// Round `value` up to the next multiple of `align` (a power of two).
#[inline]
pub fn align_up(value: u64, align: u64) -> u64 {
    (value + align - 1) & !(align - 1)
}

/// Bytes needed to bring `len` to a multiple of `align` (a power of two).
#[inline]
pub fn padding_for(len: usize, align: usize) -> usize {
    (align_up(len as u64, align as u64) - len as u64) as usize
}

/// Whether `value` is representable as a two's-complement integer of `width` bytes.
pub fn fits_signed(value: i64, width: usize) -> bool {
    if width >= 8 {
        return true;
    }
    let bits = width as u32 * 8;
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    (min..=max).contains(&value)
}
