//! Miscellaneous utilities for working with bits.

use crate::{Error, Result, MAX_WIDTH};

/// Sign-extends an `nbits` wide value to [`i64`].
///
/// `nbits` must be in `1..=64`. Bits above `nbits` in `value` are
/// ignored.
#[inline]
pub fn sign_extend(value: u64, nbits: u32) -> i64 {
    debug_assert!((1..=u64::BITS).contains(&nbits));

    let shift = u64::BITS - nbits;
    (value << shift) as i64 >> shift
}

/// Gets the number of bytes needed to store `bits` bits.
#[inline]
pub const fn bits_to_bytes(bits: usize) -> usize {
    bits.div_ceil(u8::BITS as usize)
}

// Validates an integer width, where signed codecs need at least
// one bit for the sign.
#[inline]
pub(crate) fn check_width(width: u32, signed: bool) -> Result<()> {
    let min = signed as u32;
    if (min..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        cold_path();
        Err(Error::InvalidWidth {
            width,
            min,
            max: MAX_WIDTH,
        })
    }
}

/// A branch prediction hint that indicates the code path is unlikely to
/// be used. This serves as a substitute for `std::hint::cold_path`
/// until that is stabilized.
#[cold]
#[inline(always)]
pub(crate) fn cold_path() {}
