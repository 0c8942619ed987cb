use std::io::SeekFrom;

use crate::{
    masks::{LOW_BITS, READ_SHIFT},
    seek,
    utils::{bits_to_bytes, check_width, cold_path, sign_extend},
    Error, Result,
};

/// A cursor which extracts bits from a borrowed byte buffer.
///
/// Bits are read MSB-first. The buffer is never mutated and must
/// outlive the reader.
///
/// Every read either completes in full or fails without moving
/// the cursor.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    // The spanned byte view to read from.
    bytes: &'a [u8],

    // The current bit offset into `bytes`.
    position: usize,

    // The number of addressable bits in `bytes`.
    size: usize,

    // A single bookmark for `reset`.
    marked: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new [`BitReader`] over all bits of a byte slice.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            size: bytes.len() << 3,
            marked: 0,
        }
    }

    /// Creates a new [`BitReader`] over the first `bits` bits of a
    /// byte slice.
    ///
    /// Fails when the slice is too short for the given bit length.
    pub fn with_bit_len(bytes: &'a [u8], bits: usize) -> Result<Self> {
        let available = bytes.len() << 3;
        if bits > available {
            return Err(Error::InvalidLength { bits, available });
        }

        Ok(Self {
            bytes,
            position: 0,
            size: bits,
            marked: 0,
        })
    }

    /// Gets the underlying byte buffer.
    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.bytes
    }

    /// Gets the total number of addressable bits.
    #[inline]
    pub fn bit_size(&self) -> usize {
        self.size
    }

    /// Gets the number of bytes spanned by the addressable bits.
    #[inline]
    pub fn byte_size(&self) -> usize {
        bits_to_bytes(self.size)
    }

    /// Gets the current position in bits.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.position
    }

    /// Gets the index of the byte the cursor currently points into.
    #[inline]
    pub fn byte_position(&self) -> usize {
        self.position >> 3
    }

    /// Gets the number of bits left to read.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.size - self.position
    }

    /// Indicates whether all bits of the stream were consumed.
    #[inline]
    pub fn is_eos(&self) -> bool {
        self.position >= self.size
    }

    /// Gets the position saved by the last [`Self::mark`] call.
    #[inline]
    pub fn marked_position(&self) -> usize {
        self.marked
    }

    /// Remembers the current position for a later [`Self::reset`].
    ///
    /// Only one position is kept; marking again replaces it.
    #[inline]
    pub fn mark(&mut self) {
        self.marked = self.position;
    }

    /// Moves the cursor back to the position saved by [`Self::mark`],
    /// or to the start of the stream when nothing was marked.
    #[inline]
    pub fn reset(&mut self) {
        self.position = self.marked;
    }

    #[inline]
    fn ensure_remaining(&self, nbits: usize) -> Result<()> {
        let remaining = self.remaining_bits();
        if nbits <= remaining {
            Ok(())
        } else {
            cold_path();
            log::trace!(
                "Read of {nbits} bits at offset {} runs past the end of the stream",
                self.position
            );

            Err(Error::EndOfStream {
                requested: nbits,
                remaining,
            })
        }
    }

    // Extracts `nbits` bits starting at `pos` as a big-endian integer.
    //
    // Callers must ensure `pos + nbits <= self.size` and `nbits <= 64`.
    fn extract(&self, mut pos: usize, mut nbits: u32) -> u64 {
        let mut value = 0;

        // Consume the rest of a partially read byte first.
        let offset = (pos & 7) as u32;
        if offset != 0 && nbits > 0 {
            let avail = u8::BITS - offset;
            let take = avail.min(nbits);

            let byte = self.bytes[pos >> 3] >> (avail - take);
            value = (byte & LOW_BITS[take as usize]) as u64;

            pos += take as usize;
            nbits -= take;
        }

        // Now on a byte boundary, whole bytes can be taken directly.
        while nbits >= u8::BITS {
            value = (value << 8) | self.bytes[pos >> 3] as u64;

            pos += 8;
            nbits -= u8::BITS;
        }

        // Pick the leading bits of the last, partial byte.
        if nbits > 0 {
            let byte = self.bytes[pos >> 3] >> (u8::BITS - nbits);
            value = (value << nbits) | (byte & LOW_BITS[nbits as usize]) as u64;
        }

        value
    }

    /// Reads a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        self.ensure_remaining(1)?;

        let byte = self.bytes[self.position >> 3];
        let bit = (byte >> READ_SHIFT[self.position & 7]) & 1;
        self.position += 1;

        Ok(bit != 0)
    }

    /// Reads the next `nbits` bits as an unsigned big-endian integer.
    ///
    /// `nbits` may be anywhere in `0..=64`; reading 0 bits yields 0.
    pub fn read_uint(&mut self, nbits: u32) -> Result<u64> {
        check_width(nbits, false)?;
        self.ensure_remaining(nbits as usize)?;

        let value = self.extract(self.position, nbits);
        self.position += nbits as usize;

        Ok(value)
    }

    /// Returns the next `nbits` bits like [`Self::read_uint`] without
    /// consuming them.
    pub fn peek_uint(&self, nbits: u32) -> Result<u64> {
        check_width(nbits, false)?;
        self.ensure_remaining(nbits as usize)?;

        Ok(self.extract(self.position, nbits))
    }

    /// Reads an `nbits` wide two's complement integer.
    ///
    /// This decodes values produced by [`BitWriter::write_int`] in
    /// the range `[-(2^(nbits-1)), 2^(nbits-1) - 1]`. It is **not**
    /// compatible with [`BitWriter::write_sint`].
    ///
    /// [`BitWriter::write_int`]: crate::BitWriter::write_int
    /// [`BitWriter::write_sint`]: crate::BitWriter::write_sint
    pub fn read_int(&mut self, nbits: u32) -> Result<i64> {
        check_width(nbits, true)?;
        self.ensure_remaining(nbits as usize)?;

        // A set sign bit extends into all upper bits of the result,
        // the low `nbits - 1` bits are taken verbatim.
        let raw = self.extract(self.position, nbits);
        self.position += nbits as usize;

        Ok(sign_extend(raw, nbits))
    }

    /// Reads an `nbits` wide sign-magnitude integer.
    ///
    /// The first bit is the sign, followed by an `nbits - 1` bit
    /// magnitude. This decodes values produced by
    /// [`BitWriter::write_sint`] in the range
    /// `[-(2^(nbits-1) - 1), 2^(nbits-1) - 1]`; a set sign bit with
    /// zero magnitude decodes to `0`. It is **not** compatible with
    /// [`BitWriter::write_int`].
    ///
    /// [`BitWriter::write_int`]: crate::BitWriter::write_int
    /// [`BitWriter::write_sint`]: crate::BitWriter::write_sint
    pub fn read_sint(&mut self, nbits: u32) -> Result<i64> {
        check_width(nbits, true)?;
        self.ensure_remaining(nbits as usize)?;

        let negative = self.extract(self.position, 1) != 0;
        let magnitude = self.extract(self.position + 1, nbits - 1) as i64;
        self.position += nbits as usize;

        Ok(if negative { -magnitude } else { magnitude })
    }

    /// Fills `out` with the next `out.len()` bytes of the stream.
    ///
    /// The bytes do not need to start on a byte boundary. They are
    /// copied verbatim.
    pub fn read_char8(&mut self, out: &mut [u8]) -> Result<()> {
        let nbits = out.len().saturating_mul(8);
        self.ensure_remaining(nbits)?;

        for byte in out.iter_mut() {
            *byte = self.extract(self.position, u8::BITS) as u8;
            self.position += 8;
        }

        Ok(())
    }

    /// Fills `out` with the next `out.len()` bytes of UTF-8 data.
    ///
    /// This performs no validation and behaves exactly like
    /// [`Self::read_char8`].
    #[inline]
    pub fn read_utf8(&mut self, out: &mut [u8]) -> Result<()> {
        self.read_char8(out)
    }

    /// Skips bits up to the next byte boundary and returns how many
    /// bits were skipped.
    ///
    /// The cursor never moves past the end of the stream.
    pub fn skip_padding_bits(&mut self) -> u32 {
        let boundary = self.position.next_multiple_of(8).min(self.size);
        let skipped = boundary - self.position;
        self.position = boundary;

        skipped as u32
    }

    /// Moves the cursor to a bit offset and returns the new position.
    ///
    /// Fails without moving the cursor when the target would lie
    /// outside of `0..=bit_size`.
    pub fn seek_bits(&mut self, pos: SeekFrom) -> Result<usize> {
        self.position = seek::resolve_bits(pos, self.position, self.size)?;
        Ok(self.position)
    }

    /// Moves the cursor to a byte offset and returns the new position
    /// in bits.
    ///
    /// `SeekFrom::Current` offsets are relative to the exact bit
    /// position, so an unaligned cursor stays unaligned.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<usize> {
        self.seek_bits(seek::bytes_to_bits(pos)?)
    }
}
