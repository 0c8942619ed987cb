use std::io::SeekFrom;

use bitstream::{BitWriter, Error, Result, Status, INITIAL_CAPACITY};

#[test]
fn write_bits_msb_first() -> Result<()> {
    let mut writer = BitWriter::new();

    for bit in [0, 1, 0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0] {
        writer.write_bit(bit != 0)?;
    }

    assert_eq!(writer.view(), &[0x55, 0xAA]);
    assert_eq!(writer.bit_size(), 16);
    assert_eq!(writer.byte_size(), 2);

    Ok(())
}

#[test]
fn write_primitives() -> Result<()> {
    let mut writer = BitWriter::new();

    writer.write_uint(8, 0xFF)?;
    writer.write_uint(16, 0xDEAD)?;
    writer.write_uint(8, 0xFF)?;

    assert_eq!(writer.view(), &[0xFF, 0xDE, 0xAD, 0xFF]);

    Ok(())
}

#[test]
fn write_unaligned_spans() -> Result<()> {
    let mut writer = BitWriter::new();

    writer.write_uint(3, 0b101)?;
    writer.write_uint(2, 0b01)?;
    writer.write_uint(13, 0b100_0011_0101_11)?;
    writer.write_uint(0, u64::MAX)?;
    writer.write_uint(6, 0b11_0000)?;

    assert_eq!(writer.view(), &[0xAC, 0x35, 0xF0]);
    assert_eq!(writer.bit_size(), 24);

    Ok(())
}

#[test]
fn excess_value_bits_are_discarded() -> Result<()> {
    let mut writer = BitWriter::new();

    writer.write_uint(4, 0xFFFF_FFF3)?;
    writer.write_uint(4, 0xA)?;

    assert_eq!(writer.view(), &[0x3A]);

    Ok(())
}

#[test]
fn partial_writes_preserve_neighbors() -> Result<()> {
    let mut buf = [0xFF; 3];
    let mut writer = BitWriter::fixed(&mut buf);

    // Patch bits in the middle of a byte.
    writer.seek_bits(SeekFrom::Start(2))?;
    writer.write_uint(3, 0)?;

    // Patch a run which straddles a byte boundary.
    writer.seek_bits(SeekFrom::Start(14))?;
    writer.write_uint(4, 0b0110)?;

    // Clear a single bit.
    writer.seek_bits(SeekFrom::Start(23))?;
    writer.write_bit(false)?;

    assert_eq!(buf, [0b1100_0111, 0b1111_1101, 0b1011_1110]);

    Ok(())
}

#[test]
fn write_full_width() -> Result<()> {
    let mut writer = BitWriter::new();

    writer.write_uint(4, 0x8)?;
    writer.write_uint(64, 0x1020_3040_5060_708F)?;
    writer.write_uint(4, 0xF)?;

    assert_eq!(
        writer.view(),
        &[0x81, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xFF]
    );

    Ok(())
}

#[test]
fn write_signed_codecs() -> Result<()> {
    let mut writer = BitWriter::new();
    writer.write_sint(5, -3)?;
    writer.write_sint(5, -13)?;
    writer.write_sint(5, 6)?;
    assert_eq!(writer.view(), &[0b1001_1111, 0b0100_1100]);

    let mut writer = BitWriter::new();
    writer.write_int(5, -13)?;
    writer.write_int(5, -3)?;
    writer.write_int(5, 6)?;
    assert_eq!(writer.view(), &[0b1001_1111, 0b0100_1100]);

    Ok(())
}

#[test]
fn signed_width_zero_is_rejected() {
    let mut writer = BitWriter::new();

    assert!(matches!(
        writer.write_sint(0, 1),
        Err(Error::InvalidWidth { width: 0, min: 1, max: 64 })
    ));
    assert!(matches!(
        writer.write_int(0, 1),
        Err(Error::InvalidWidth { width: 0, .. })
    ));
    assert!(matches!(
        writer.write_uint(65, 1),
        Err(Error::InvalidWidth { width: 65, .. })
    ));
    assert_eq!(writer.bit_size(), 0);
}

#[test]
fn write_bytes_unaligned() -> Result<()> {
    let mut writer = BitWriter::new();

    writer.write_uint(4, 0)?;
    writer.write_char8(&[0xAB, 0xCD])?;
    writer.write_utf8("é")?;

    assert_eq!(writer.bit_size(), 36);
    assert_eq!(writer.view(), &[0x0A, 0xBC, 0xDC, 0x3A, 0x90]);

    Ok(())
}

#[test]
fn padding_to_byte() -> Result<()> {
    let mut writer = BitWriter::new();

    assert_eq!(writer.padding_bits(true), 0);

    writer.write_uint(3, 0)?;
    assert_eq!(writer.padding_bits(true), 5);
    assert_eq!(writer.bit_size(), 8);

    writer.write_bit(true)?;
    assert_eq!(writer.padding_bits(false), 7);

    assert_eq!(writer.view(), &[0x1F, 0x80]);

    Ok(())
}

#[test]
fn seeking() -> Result<()> {
    let mut writer = BitWriter::new();
    let capacity = INITIAL_CAPACITY * 8;

    writer.write_uint(16, 0xABCD)?;
    assert_eq!(writer.seek(SeekFrom::Start(1))?, 8);
    writer.write_uint(8, 0xEF)?;
    assert_eq!(writer.view(), &[0xAB, 0xEF]);

    assert_eq!(writer.seek_bits(SeekFrom::End(0))?, capacity);
    assert_eq!(writer.seek_bits(SeekFrom::Current(-4))?, capacity - 4);

    assert!(matches!(
        writer.seek_bits(SeekFrom::End(1)),
        Err(Error::InvalidSeek { .. })
    ));
    assert!(writer.seek_bits(SeekFrom::Current(-(capacity as i64))).is_err());
    assert_eq!(writer.bit_size(), capacity - 4);

    writer.reset();
    assert_eq!(writer.bit_size(), 0);
    assert_eq!(writer.buffer()[..2], [0xAB, 0xEF]);

    Ok(())
}

#[test]
fn fixed_buffer_scenario() -> Result<()> {
    let mut buf = [0; 0xFF];
    let mut writer = BitWriter::fixed(&mut buf);

    assert!(writer.is_fixed());
    assert_eq!(writer.capacity(), 0xFF);

    for i in 1..=6 {
        writer.write_uint(3, 3)?;
        assert_eq!(writer.bit_size(), i * 3);
        assert_eq!(writer.byte_size(), (i * 3).div_ceil(8));
    }

    assert_eq!(writer.bit_size(), 18);
    assert_eq!(writer.byte_size(), 3);
    assert_eq!(writer.view(), &[0b0110_1101, 0b1011_0110, 0b1100_0000]);

    Ok(())
}

#[test]
fn fixed_buffer_overflow() -> Result<()> {
    let mut buf = [0; 2];
    let mut writer = BitWriter::fixed(&mut buf);

    writer.write_uint(10, 0x3FF)?;

    let result = writer.write_uint(7, 0);
    assert_eq!(Status::of(&result), Status::Failure);
    assert!(matches!(
        result,
        Err(Error::Overflow {
            requested: 7,
            available: 6
        })
    ));

    // Multi-part writes fail before any bit is touched.
    assert!(writer.write_sint(7, -1).is_err());
    assert!(writer.write_char8(&[0]).is_err());
    assert_eq!(writer.bit_size(), 10);
    assert_eq!(writer.capacity(), 2);

    writer.write_uint(6, 0)?;
    assert!(writer.write_bit(true).is_err());
    assert_eq!(writer.padding_bits(true), 0);
    assert_eq!(writer.bit_size(), 16);

    drop(writer);
    assert_eq!(buf, [0xFF, 0xC0]);

    Ok(())
}

#[test]
fn into_vec_returns_written_bytes() -> Result<()> {
    let mut writer = BitWriter::new();
    writer.write_uint(12, 0xABC)?;
    assert_eq!(writer.into_vec(), vec![0xAB, 0xC0]);

    let mut buf = [0; 8];
    let mut writer = BitWriter::fixed(&mut buf);
    writer.write_uint(9, 0x1FF)?;
    assert_eq!(writer.into_vec(), vec![0xFF, 0x80]);

    Ok(())
}
