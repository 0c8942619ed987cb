//! Lookup tables for MSB-first bit manipulation.
//!
//! Bit index `i` within a byte always counts from the MSB, so
//! index 0 is `0x80` and index 7 is `0x01`.

/// Right shift which moves bit `i` of a byte into the LSB.
pub const READ_SHIFT: [u32; 8] = build_read_shift();

/// Masks selecting the low `n` bits of a byte, for `n` in `0..=8`.
pub const LOW_BITS: [u8; 9] = build_low_bits();

/// Masks which set bit `i` of a byte when OR'ed into it.
pub const SET_ONE: [u8; 8] = build_set_one();

/// Masks which clear bit `i` of a byte when AND'ed into it.
pub const SET_ZERO: [u8; 8] = build_set_zero();

const fn build_read_shift() -> [u32; 8] {
    let mut table = [0; 8];
    let mut i = 0;
    while i < 8 {
        table[i] = 7 - i as u32;
        i += 1;
    }
    table
}

const fn build_low_bits() -> [u8; 9] {
    let mut table = [0; 9];
    let mut n = 0;
    while n < 9 {
        table[n] = ((1u16 << n) - 1) as u8;
        n += 1;
    }
    table
}

const fn build_set_one() -> [u8; 8] {
    let mut table = [0; 8];
    let mut i = 0;
    while i < 8 {
        table[i] = 0x80 >> i;
        i += 1;
    }
    table
}

const fn build_set_zero() -> [u8; 8] {
    let mut table = [0; 8];
    let mut i = 0;
    while i < 8 {
        table[i] = !(0x80u8 >> i);
        i += 1;
    }
    table
}
