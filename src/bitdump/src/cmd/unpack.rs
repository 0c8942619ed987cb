use std::{
    io::{self, SeekFrom, Write},
    path::PathBuf,
};

use bitstream::{BitReader, Error};
use clap::Args;

use super::Command;
use crate::{
    cli::io::read_input,
    field::{Layout, Value},
};

/// Subcommand for decoding typed fields from a bit stream into JSON.
#[derive(Debug, Args)]
pub struct Unpack {
    /// The file to decode, or "-" to read from stdin.
    input: PathBuf,

    /// The layout of the fields to decode, in order.
    ///
    /// Supported forms are `u<N>`, `i<N>`, `s<N>`, `b`, `pad`
    /// and `str<NBYTES>`.
    #[clap(required = true)]
    layout: Vec<Layout>,

    /// The bit offset to start decoding at.
    #[clap(short, long, default_value_t = 0)]
    offset: u64,

    /// Repeats the layout until the stream runs out of bits.
    #[clap(short, long)]
    repeat: bool,
}

impl Command for Unpack {
    fn handle(self) -> eyre::Result<()> {
        let data = read_input(&self.input)?;

        let mut reader = BitReader::new(&data);
        reader.seek_bits(SeekFrom::Start(self.offset))?;

        let values = unpack(&mut reader, &self.layout, self.repeat)?;

        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &values)?;
        writeln!(stdout)?;

        Ok(())
    }
}

/// Decodes values following `layout` from the reader.
///
/// With `repeat`, the layout is applied again and again until the
/// stream ends cleanly at a record boundary.
pub fn unpack(
    reader: &mut BitReader<'_>,
    layout: &[Layout],
    repeat: bool,
) -> eyre::Result<Vec<Value>> {
    let mut values = Vec::new();

    loop {
        let start = reader.bit_position();

        for (idx, field) in layout.iter().enumerate() {
            match field.read(reader) {
                Ok(Some(value)) => values.push(value),
                Ok(None) => {}

                Err(Error::EndOfStream { .. }) if repeat && idx == 0 && reader.is_eos() => {
                    return Ok(values);
                }
                Err(e) => {
                    return Err(eyre::eyre!(
                        "failed to decode field #{idx} ({field:?}) at bit {}: {e}",
                        reader.bit_position()
                    ));
                }
            }
        }

        if !repeat || reader.is_eos() {
            break;
        }
        if reader.bit_position() == start {
            return Err(eyre::eyre!(
                "layout consumes no bits at bit {start}; it cannot be repeated"
            ));
        }
        log::trace!("Next record at bit {}", reader.bit_position());
    }

    Ok(values)
}
