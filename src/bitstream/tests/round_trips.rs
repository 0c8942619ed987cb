use bitstream::{BitReader, BitWriter, Result};

// Writes fields through `write` at a few unaligned start offsets and
// checks that `read` recovers them.
fn at_offsets<W, R>(mut write: W, mut read: R) -> Result<()>
where
    W: FnMut(&mut BitWriter<'_>) -> Result<()>,
    R: FnMut(&mut BitReader<'_>) -> Result<()>,
{
    for lead in [0, 1, 5, 7] {
        let mut writer = BitWriter::new();
        writer.write_uint(lead, u64::MAX)?;
        write(&mut writer)?;

        let mut reader = BitReader::new(writer.view());
        assert_eq!(reader.read_uint(lead)?, (1 << lead) - 1);
        read(&mut reader)?;
        assert!(reader.remaining_bits() < 8);
    }

    Ok(())
}

#[test]
fn unsigned_values() -> Result<()> {
    for nbits in 1..=64u32 {
        let max = u64::MAX >> (64 - nbits);
        let values = [0, 1, max, max >> 1, 0xA5A5_A5A5_A5A5_A5A5 & max];

        at_offsets(
            |w| values.iter().try_for_each(|&v| w.write_uint(nbits, v)),
            |r| {
                for &v in &values {
                    assert_eq!(r.read_uint(nbits)?, v, "{nbits} bits");
                }
                Ok(())
            },
        )?;
    }

    Ok(())
}

#[test]
fn sign_magnitude_values() -> Result<()> {
    for nbits in 2..=64u32 {
        let max = (u64::MAX >> (65 - nbits)) as i64;
        let values = [0, -0, 1, -1, max, -max, max / 3, -(max / 3)];

        at_offsets(
            |w| values.iter().try_for_each(|&v| w.write_sint(nbits, v)),
            |r| {
                for &v in &values {
                    assert_eq!(r.read_sint(nbits)?, v, "{nbits} bits");
                }
                Ok(())
            },
        )?;
    }

    Ok(())
}

#[test]
fn twos_complement_values() -> Result<()> {
    for nbits in 1..=64u32 {
        let min = i64::MIN >> (64 - nbits);
        let max = i64::MAX >> (64 - nbits);
        let values = [0, -1, min, max, min / 3, max / 3];

        at_offsets(
            |w| values.iter().try_for_each(|&v| w.write_int(nbits, v)),
            |r| {
                for &v in &values {
                    assert_eq!(r.read_int(nbits)?, v, "{nbits} bits");
                }
                Ok(())
            },
        )?;
    }

    Ok(())
}

#[test]
fn sign_magnitude_zero_is_unsigned_zero() -> Result<()> {
    let mut positive = BitWriter::new();
    positive.write_sint(9, 0)?;

    let mut negative = BitWriter::new();
    negative.write_sint(9, -0)?;

    assert_eq!(positive.view(), negative.view());
    assert_eq!(positive.view(), &[0, 0]);

    Ok(())
}

#[test]
fn signed_codecs_do_not_mix() -> Result<()> {
    let mut writer = BitWriter::new();
    writer.write_int(8, -1)?;
    writer.write_sint(8, -1)?;

    let mut reader = BitReader::new(writer.view());
    assert_eq!(reader.read_sint(8)?, -127);
    assert_eq!(reader.read_int(8)?, -127);

    // Non-negative values agree in both codecs.
    let mut writer = BitWriter::new();
    writer.write_int(8, 100)?;

    let mut reader = BitReader::new(writer.view());
    assert_eq!(reader.read_sint(8)?, 100);

    Ok(())
}

#[test]
fn sizes_track_written_bits() -> Result<()> {
    for nbits in [1, 3, 7, 8, 13, 64] {
        let mut writer = BitWriter::new();

        for k in 1..=20 {
            writer.write_uint(nbits, k as u64)?;
            assert_eq!(writer.bit_size(), k * nbits as usize);
            assert_eq!(writer.byte_size(), (k * nbits as usize).div_ceil(8));
        }
    }

    Ok(())
}

#[test]
fn bytes_round_trip() -> Result<()> {
    let text = "bit streams, ünaligned";

    let mut writer = BitWriter::new();
    writer.write_bit(true)?;
    writer.write_utf8(text)?;
    writer.write_char8(b"\x00\xFF")?;

    let mut reader = BitReader::new(writer.view());
    assert!(reader.read_bit()?);

    let mut out = vec![0; text.len()];
    reader.read_utf8(&mut out)?;
    assert_eq!(out, text.as_bytes());

    let mut out = [0; 2];
    reader.read_char8(&mut out)?;
    assert_eq!(out, [0x00, 0xFF]);

    Ok(())
}

#[test]
fn wide_value_then_bits() -> Result<()> {
    let mut writer = BitWriter::new();
    writer.write_uint(64, 3)?;
    writer.write_uint(1, 1)?;
    writer.write_uint(1, 1)?;

    assert_eq!(writer.bit_size(), 66);
    assert_eq!(writer.byte_size(), 9);

    let mut reader = BitReader::with_bit_len(writer.view(), writer.bit_size())?;
    let mut bits = String::new();
    while let Ok(bit) = reader.read_bit() {
        bits.push(if bit { '1' } else { '0' });
    }

    assert_eq!(bits, format!("{}1111", "0".repeat(62)));

    Ok(())
}
