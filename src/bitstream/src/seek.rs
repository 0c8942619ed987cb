use std::io::SeekFrom;

use crate::{utils::cold_path, Error, Result};

/// Resolves a seek request in bits against a cursor at `position`
/// in a stream of `limit` bits.
///
/// The resulting position must lie in `0..=limit`.
pub fn resolve_bits(pos: SeekFrom, position: usize, limit: usize) -> Result<usize> {
    let target = match pos {
        SeekFrom::Start(offset) => offset as i128,
        SeekFrom::Current(offset) => position as i128 + offset as i128,
        SeekFrom::End(offset) => limit as i128 + offset as i128,
    };

    if (0..=limit as i128).contains(&target) {
        Ok(target as usize)
    } else {
        cold_path();
        Err(Error::InvalidSeek { target })
    }
}

/// Converts a seek request in bytes into the equivalent request in bits.
pub fn bytes_to_bits(pos: SeekFrom) -> Result<SeekFrom> {
    let scaled = match pos {
        SeekFrom::Start(offset) => offset.checked_mul(8).map(SeekFrom::Start),
        SeekFrom::Current(offset) => offset.checked_mul(8).map(SeekFrom::Current),
        SeekFrom::End(offset) => offset.checked_mul(8).map(SeekFrom::End),
    };

    scaled.ok_or_else(|| {
        let offset = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(offset) | SeekFrom::End(offset) => offset as i128,
        };
        Error::InvalidSeek { target: offset * 8 }
    })
}
