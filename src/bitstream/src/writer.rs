use std::io::SeekFrom;

use crate::{
    masks::{LOW_BITS, SET_ONE, SET_ZERO},
    seek,
    utils::{bits_to_bytes, check_width, cold_path},
    Error, Result, INITIAL_CAPACITY,
};

// The backing memory of a writer.
#[derive(Debug)]
enum Storage<'a> {
    // A caller-provided buffer which is never reallocated.
    Fixed(&'a mut [u8]),

    // A buffer owned by the writer which doubles in size on demand.
    Owned(Vec<u8>),
}

impl Storage<'_> {
    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Fixed(bytes) => bytes,
            Self::Owned(bytes) => bytes,
        }
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Fixed(bytes) => bytes,
            Self::Owned(bytes) => bytes,
        }
    }
}

/// A cursor which packs bits into a byte buffer.
///
/// Bits are written MSB-first. Partially written bytes keep the
/// bits that are not being overwritten, so seeking back and
/// patching a field leaves its neighbors intact.
///
/// A writer either operates on a borrowed buffer of fixed size,
/// failing writes that do not fit, or on an owned buffer that
/// starts at [`INITIAL_CAPACITY`] bytes and doubles whenever a
/// write needs more room.
///
/// Every write either completes in full or fails without moving
/// the cursor or touching the buffer.
#[derive(Debug)]
pub struct BitWriter<'a> {
    // The buffer where data is being written to.
    storage: Storage<'a>,

    // The current bit offset into the storage.
    position: usize,
}

impl Default for BitWriter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BitWriter<'a> {
    /// Creates a [`BitWriter`] with an owned, growable buffer.
    pub fn new() -> Self {
        Self {
            storage: Storage::Owned(vec![0; INITIAL_CAPACITY]),
            position: 0,
        }
    }

    /// Creates a [`BitWriter`] over a caller-provided buffer.
    ///
    /// The writer never reallocates; its capacity is the length of
    /// `buf`. Writes which would exceed it fail with
    /// [`Error::Overflow`].
    pub fn fixed(buf: &'a mut [u8]) -> Self {
        Self {
            storage: Storage::Fixed(buf),
            position: 0,
        }
    }

    /// Indicates whether the writer is bound to a fixed buffer.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self.storage, Storage::Fixed(..))
    }

    /// Gets the entire backing buffer, including bytes past the
    /// current position.
    ///
    /// The borrow must end before the next write, which may move
    /// the buffer when it grows.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        self.storage.bytes()
    }

    /// Gets a view of the bytes covered by the written bits.
    ///
    /// The last byte may be partially written.
    #[inline]
    pub fn view(&self) -> &[u8] {
        &self.storage.bytes()[..self.byte_size()]
    }

    /// Consumes the [`BitWriter`] and returns the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        let len = self.byte_size();
        match self.storage {
            Storage::Fixed(bytes) => bytes[..len].to_vec(),
            Storage::Owned(mut bytes) => {
                bytes.truncate(len);
                bytes
            }
        }
    }

    /// Gets the number of written bits, which is the current position.
    #[inline]
    pub fn bit_size(&self) -> usize {
        self.position
    }

    /// Gets the number of bytes spanned by the written bits.
    #[inline]
    pub fn byte_size(&self) -> usize {
        bits_to_bytes(self.position)
    }

    /// Gets the capacity of the backing buffer in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.bytes().len()
    }

    /// Gets the capacity of the backing buffer in bits.
    #[inline]
    pub fn bit_capacity(&self) -> usize {
        self.capacity() << 3
    }

    /// Makes sure `nbits` more bits fit at the current position,
    /// growing an owned buffer as needed.
    fn reserve_bits(&mut self, nbits: usize) -> Result<()> {
        let capacity = self.bit_capacity();
        let available = capacity - self.position;
        if nbits <= available {
            return Ok(());
        }

        cold_path();
        match &mut self.storage {
            Storage::Fixed(..) => {
                log::trace!(
                    "Write of {nbits} bits at offset {} overflows fixed buffer of {capacity} bits",
                    self.position
                );

                Err(Error::Overflow {
                    requested: nbits,
                    available,
                })
            }

            Storage::Owned(bytes) => {
                let required = bits_to_bytes(self.position.saturating_add(nbits));

                // Keep doubling so capacity stays a power-of-two
                // multiple of the initial size.
                let old = bytes.len();
                let mut new = old.max(INITIAL_CAPACITY);
                while new < required {
                    new = new.saturating_mul(2);
                }

                bytes.try_reserve_exact(new - old)?;
                bytes.resize(new, 0);

                log::debug!("Grew stream buffer from {old} to {new} bytes");
                Ok(())
            }
        }
    }

    // Stores the low `nbits` bits of `value` at bit offset `pos`,
    // keeping all surrounding bits.
    //
    // Callers must have reserved the bits and ensure `nbits <= 64`.
    fn insert(&mut self, mut pos: usize, mut nbits: u32, value: u64) {
        let bytes = self.storage.bytes_mut();

        // Fill up the rest of a partially written byte first.
        let offset = (pos & 7) as u32;
        if offset != 0 && nbits > 0 {
            let avail = u8::BITS - offset;
            let take = avail.min(nbits);
            let shift = avail - take;
            nbits -= take;

            let mask = LOW_BITS[take as usize] << shift;
            let bits = ((value >> nbits) as u8) << shift;

            let byte = &mut bytes[pos >> 3];
            *byte = (*byte & !mask) | (bits & mask);

            pos += take as usize;
        }

        // Now on a byte boundary, whole bytes can be stored directly.
        while nbits >= u8::BITS {
            nbits -= u8::BITS;
            bytes[pos >> 3] = (value >> nbits) as u8;

            pos += 8;
        }

        // Put the remaining bits into the leading bits of the last byte.
        if nbits > 0 {
            let shift = u8::BITS - nbits;
            let preserve = LOW_BITS[shift as usize];
            let bits = (value as u8 & LOW_BITS[nbits as usize]) << shift;

            let byte = &mut bytes[pos >> 3];
            *byte = (*byte & preserve) | bits;
        }
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.reserve_bits(1)?;

        let index = self.position & 7;
        let byte = &mut self.storage.bytes_mut()[self.position >> 3];
        if bit {
            *byte |= SET_ONE[index];
        } else {
            *byte &= SET_ZERO[index];
        }
        self.position += 1;

        Ok(())
    }

    /// Writes the low `nbits` bits of `value` as a big-endian integer.
    ///
    /// `nbits` may be anywhere in `0..=64`. Higher bits of `value` are
    /// discarded.
    pub fn write_uint(&mut self, nbits: u32, value: u64) -> Result<()> {
        check_width(nbits, false)?;
        self.reserve_bits(nbits as usize)?;

        self.insert(self.position, nbits, value);
        self.position += nbits as usize;

        Ok(())
    }

    /// Writes `value` as an `nbits` wide two's complement integer.
    ///
    /// This stores the low `nbits` bits of the 64-bit two's complement
    /// representation, so values in `[-(2^(nbits-1)), 2^(nbits-1) - 1]`
    /// are recovered by [`BitReader::read_int`]. It is **not** compatible
    /// with [`BitReader::read_sint`].
    ///
    /// [`BitReader::read_int`]: crate::BitReader::read_int
    /// [`BitReader::read_sint`]: crate::BitReader::read_sint
    pub fn write_int(&mut self, nbits: u32, value: i64) -> Result<()> {
        check_width(nbits, true)?;
        self.write_uint(nbits, value as u64)
    }

    /// Writes `value` as an `nbits` wide sign-magnitude integer.
    ///
    /// One bit holds the sign, the remaining `nbits - 1` bits hold the
    /// absolute value. Values in `[-(2^(nbits-1) - 1), 2^(nbits-1) - 1]`
    /// are recovered by [`BitReader::read_sint`]; larger magnitudes are
    /// truncated. It is **not** compatible with [`BitReader::read_int`].
    ///
    /// [`BitReader::read_int`]: crate::BitReader::read_int
    /// [`BitReader::read_sint`]: crate::BitReader::read_sint
    pub fn write_sint(&mut self, nbits: u32, value: i64) -> Result<()> {
        check_width(nbits, true)?;
        self.reserve_bits(nbits as usize)?;

        self.insert(self.position, 1, (value < 0) as u64);
        self.insert(self.position + 1, nbits - 1, value.unsigned_abs());
        self.position += nbits as usize;

        Ok(())
    }

    /// Writes all bytes of `buf` verbatim, starting at the current
    /// bit position.
    pub fn write_char8(&mut self, buf: &[u8]) -> Result<()> {
        self.reserve_bits(buf.len().saturating_mul(8))?;

        for &byte in buf {
            self.insert(self.position, u8::BITS, byte as u64);
            self.position += 8;
        }

        Ok(())
    }

    /// Writes the UTF-8 bytes of `s` verbatim.
    ///
    /// This behaves exactly like [`Self::write_char8`].
    #[inline]
    pub fn write_utf8(&mut self, s: &str) -> Result<()> {
        self.write_char8(s.as_bytes())
    }

    /// Fills the bits up to the next byte boundary with `bit` and
    /// returns how many bits were written.
    ///
    /// Since capacity is always a whole number of bytes, this
    /// cannot fail.
    pub fn padding_bits(&mut self, bit: bool) -> u32 {
        let count = (8 - (self.position & 7)) & 7;
        if count == 0 {
            return 0;
        }

        let byte = &mut self.storage.bytes_mut()[self.position >> 3];
        let mask = LOW_BITS[count];
        if bit {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        self.position += count;

        count as u32
    }

    /// Moves the cursor back to the start of the buffer.
    ///
    /// Written data is kept, but [`Self::bit_size`] starts over.
    #[inline]
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Moves the cursor to a bit offset and returns the new position.
    ///
    /// Fails without moving the cursor when the target would lie
    /// outside of `0..=bit_capacity`.
    pub fn seek_bits(&mut self, pos: SeekFrom) -> Result<usize> {
        self.position = seek::resolve_bits(pos, self.position, self.bit_capacity())?;
        Ok(self.position)
    }

    /// Moves the cursor to a byte offset and returns the new position
    /// in bits.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<usize> {
        self.seek_bits(seek::bytes_to_bits(pos)?)
    }
}
