use std::collections::TryReserveError;

use thiserror::Error;

/// Convenience alias for results produced by the bit cursors.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that may occur while reading or writing bit streams.
///
/// A failed operation never moves the cursor. The stream stays
/// valid and can be inspected or used further after any error.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer bits remain in the stream than an operation requested.
    ///
    /// This is the expected outcome when probing for more data and
    /// usually means "stop reading".
    #[error("end of stream: requested {requested} bits, {remaining} remaining")]
    EndOfStream { requested: usize, remaining: usize },

    /// A write would exceed the capacity of a fixed buffer.
    #[error("fixed buffer overflow: requested {requested} bits, {available} available")]
    Overflow { requested: usize, available: usize },

    /// Growing the owned buffer of a writer failed.
    #[error("failed to grow stream buffer: {0}")]
    Allocation(#[from] TryReserveError),

    /// A bit width is not supported by the requested codec.
    #[error("unsupported bit width {width}; expected {min} to {max} bits")]
    InvalidWidth { width: u32, min: u32, max: u32 },

    /// A seek resolved to a position outside the stream.
    #[error("seek target {target} is outside the stream")]
    InvalidSeek { target: i128 },

    /// A reader was constructed with more bits than its buffer holds.
    #[error("bit length {bits} exceeds the {available} bits of the buffer")]
    InvalidLength { bits: usize, available: usize },
}

impl Error {
    /// Maps the error onto the three-valued stream status.
    pub fn status(&self) -> Status {
        match self {
            Self::EndOfStream { .. } => Status::EndOfStream,
            _ => Status::Failure,
        }
    }

    /// Whether this error signals that the stream ran out of bits.
    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream { .. })
    }
}

/// The coarse outcome of a stream operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation completed.
    Success,
    /// The operation failed due to overflow, allocation or bad arguments.
    Failure,
    /// A read ran past the end of the stream.
    EndOfStream,
}

impl Status {
    /// Gets the status of an operation from its result.
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(..) => Self::Success,
            Err(e) => e.status(),
        }
    }
}
