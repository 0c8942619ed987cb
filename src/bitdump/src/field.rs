//! Textual descriptions of bit stream fields.
//!
//! Fields to pack are given as `<kind>=<value>`, layouts to unpack
//! as just `<kind>`:
//!
//! | Kind         | Meaning                                       |
//! |--------------|-----------------------------------------------|
//! | `u<N>`       | `N`-bit unsigned integer                      |
//! | `i<N>`       | `N`-bit two's complement integer              |
//! | `s<N>`       | `N`-bit sign-magnitude integer                |
//! | `b`          | single bit, `0` or `1`                        |
//! | `pad`        | padding to the next byte, filled with `0`/`1` |
//! | `str`        | raw bytes of a string (pack only)             |
//! | `str<N>`     | `N` raw bytes decoded as UTF-8 (unpack only)  |

use std::{num::ParseIntError, str::FromStr};

use bitstream::{BitReader, BitWriter, MAX_WIDTH};
use serde::Serialize;
use thiserror::Error;

/// Errors produced when parsing field descriptions.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The description does not name a known field kind.
    #[error("unknown field kind '{0}'")]
    UnknownKind(String),

    /// A pack field is missing its `=<value>` part.
    #[error("field '{0}' needs a value; write it as '{0}=<value>'")]
    MissingValue(String),

    /// An unpack layout unexpectedly carries a value.
    #[error("layout '{0}' must not carry a value")]
    UnexpectedValue(String),

    /// An integer width is outside of what the codec supports.
    #[error("width {0} is not supported; use 1 to {max}", max = MAX_WIDTH)]
    BadWidth(u32),

    /// A single bit value was neither `0` nor `1`.
    #[error("bit value must be 0 or 1, got '{0}'")]
    BadBit(String),

    /// A number failed to parse.
    #[error("{0}")]
    Number(#[from] ParseIntError),
}

// The kind of a field, shared between pack and unpack syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    UInt(u32),
    Int(u32),
    SInt(u32),
    Bit,
    Pad,
    Str(Option<usize>),
}

impl FromStr for Kind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" => return Ok(Self::Bit),
            "pad" => return Ok(Self::Pad),
            "str" => return Ok(Self::Str(None)),
            _ => {}
        }

        if let Some(len) = s.strip_prefix("str") {
            return Ok(Self::Str(Some(len.parse()?)));
        }

        let (ctor, width): (fn(u32) -> Self, _) = match s.split_at_checked(1) {
            Some(("u", w)) => (Self::UInt, w),
            Some(("i", w)) => (Self::Int, w),
            Some(("s", w)) => (Self::SInt, w),
            _ => return Err(FieldError::UnknownKind(s.to_owned())),
        };

        let width = width
            .parse()
            .map_err(|_| FieldError::UnknownKind(s.to_owned()))?;
        if (1..=MAX_WIDTH).contains(&width) {
            Ok(ctor(width))
        } else {
            Err(FieldError::BadWidth(width))
        }
    }
}

fn parse_bit(v: &str) -> Result<bool, FieldError> {
    match v {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(FieldError::BadBit(v.to_owned())),
    }
}

/// A field with a value to be packed into a bit stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    UInt(u32, u64),
    Int(u32, i64),
    SInt(u32, i64),
    Bit(bool),
    Pad(bool),
    Str(String),
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once('=')
            .ok_or_else(|| FieldError::MissingValue(s.to_owned()))?;

        Ok(match kind.parse()? {
            Kind::UInt(w) => Self::UInt(w, value.parse()?),
            Kind::Int(w) => Self::Int(w, value.parse()?),
            Kind::SInt(w) => Self::SInt(w, value.parse()?),
            Kind::Bit => Self::Bit(parse_bit(value)?),
            Kind::Pad => Self::Pad(parse_bit(value)?),
            Kind::Str(None) => Self::Str(value.to_owned()),
            Kind::Str(Some(..)) => return Err(FieldError::UnknownKind(kind.to_owned())),
        })
    }
}

impl Field {
    /// Writes the field to the given writer.
    pub fn write(&self, writer: &mut BitWriter<'_>) -> bitstream::Result<()> {
        match self {
            Self::UInt(w, v) => writer.write_uint(*w, *v),
            Self::Int(w, v) => writer.write_int(*w, *v),
            Self::SInt(w, v) => writer.write_sint(*w, *v),
            Self::Bit(v) => writer.write_bit(*v),
            Self::Pad(v) => {
                writer.padding_bits(*v);
                Ok(())
            }
            Self::Str(v) => writer.write_utf8(v),
        }
    }
}

/// A field to be decoded from a bit stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    UInt(u32),
    Int(u32),
    SInt(u32),
    Bit,
    Pad,
    Str(usize),
}

impl FromStr for Layout {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('=') {
            return Err(FieldError::UnexpectedValue(s.to_owned()));
        }

        Ok(match s.parse()? {
            Kind::UInt(w) => Self::UInt(w),
            Kind::Int(w) => Self::Int(w),
            Kind::SInt(w) => Self::SInt(w),
            Kind::Bit => Self::Bit,
            Kind::Pad => Self::Pad,
            Kind::Str(Some(len)) => Self::Str(len),
            Kind::Str(None) => return Err(FieldError::MissingValue(s.to_owned())),
        })
    }
}

/// A value decoded from a bit stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    UInt(u64),
    Int(i64),
    Bit(bool),
    Str(String),
}

impl Layout {
    /// Reads the field from the given reader.
    ///
    /// Padding produces no value.
    pub fn read(&self, reader: &mut BitReader<'_>) -> bitstream::Result<Option<Value>> {
        let value = match *self {
            Self::UInt(w) => Value::UInt(reader.read_uint(w)?),
            Self::Int(w) => Value::Int(reader.read_int(w)?),
            Self::SInt(w) => Value::Int(reader.read_sint(w)?),
            Self::Bit => Value::Bit(reader.read_bit()?),
            Self::Pad => {
                let skipped = reader.skip_padding_bits();
                log::trace!("Skipped {skipped} padding bits");
                return Ok(None);
            }
            Self::Str(len) => {
                // Check the length against the stream before allocating.
                let requested = len.saturating_mul(8);
                let remaining = reader.remaining_bits();
                if requested > remaining {
                    return Err(bitstream::Error::EndOfStream {
                        requested,
                        remaining,
                    });
                }

                let mut buf = vec![0; len];
                reader.read_utf8(&mut buf)?;
                Value::Str(String::from_utf8_lossy(&buf).into_owned())
            }
        };

        Ok(Some(value))
    }
}
