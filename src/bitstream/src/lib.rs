//! Provides bit-addressable cursors for packing and unpacking data.
//!
//! Many binary formats store their fields at arbitrary bit widths
//! rather than whole bytes. This crate offers the substrate for
//! such formats: a read-only [`BitReader`] over a borrowed byte
//! slice and a [`BitWriter`] over either a borrowed, fixed-size
//! slice or an owned buffer that grows on demand.
//!
//! Neither cursor adds framing, headers or schema information of
//! its own. Callers must agree on field order and widths.
//!
//! # Bit order
//!
//! All operations are MSB-first: bit index 0 is the most significant
//! bit of byte 0, and multi-bit integers are stored big-endian at the
//! bit level.
//!
//! # Signed integers
//!
//! Two distinct signed encodings are provided and they must not be
//! mixed:
//!
//! - [`BitWriter::write_int`] / [`BitReader::read_int`] store two's
//!   complement values in `[-(2^(n-1)), 2^(n-1) - 1]`.
//! - [`BitWriter::write_sint`] / [`BitReader::read_sint`] store an
//!   explicit sign bit followed by an `n - 1` bit magnitude, covering
//!   `[-(2^(n-1) - 1), 2^(n-1) - 1]`.
//!
//! Writing with one codec and reading with the other silently decodes
//! wrong values for negative numbers.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_uint(3, 5)?;
//! writer.write_sint(5, -7)?;
//! writer.write_bit(true)?;
//! assert_eq!(writer.bit_size(), 9);
//!
//! let mut reader = BitReader::new(writer.view());
//! assert_eq!(reader.read_uint(3)?, 5);
//! assert_eq!(reader.read_sint(5)?, -7);
//! assert!(reader.read_bit()?);
//! # Ok::<(), bitstream::Error>(())
//! ```

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
pub use error::{Error, Result, Status};

mod masks;

mod reader;
pub use reader::BitReader;

mod seek;

pub mod utils;

mod writer;
pub use writer::BitWriter;

/// The widest integer, in bits, that can be transferred in one operation.
pub const MAX_WIDTH: u32 = u64::BITS;

/// Initial byte capacity of a growable [`BitWriter`].
pub const INITIAL_CAPACITY: usize = 16;
