use std::{
    io::{self, SeekFrom, Write},
    path::PathBuf,
};

use bitstream::BitReader;
use clap::Args;

use super::Command;
use crate::cli::io::read_input;

/// Subcommand for printing the bits of a file, MSB-first.
#[derive(Debug, Args)]
pub struct Dump {
    /// The file to dump, or "-" to read from stdin.
    input: PathBuf,

    /// The bit offset to start dumping at.
    #[clap(short, long, default_value_t = 0)]
    offset: u64,

    /// The maximum number of bits to dump.
    #[clap(short, long)]
    bits: Option<usize>,

    /// Inserts a space after every N bits; 0 disables grouping.
    #[clap(short, long, env = "BITDUMP_GROUP", default_value_t = 8)]
    group: usize,
}

impl Command for Dump {
    fn handle(self) -> eyre::Result<()> {
        let data = read_input(&self.input)?;

        let mut reader = BitReader::new(&data);
        reader.seek_bits(SeekFrom::Start(self.offset))?;

        let line = render(&mut reader, self.bits.unwrap_or(usize::MAX), self.group);
        log::debug!(
            "Stopped at bit {} of {}",
            reader.bit_position(),
            reader.bit_size()
        );

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;

        Ok(())
    }
}

/// Renders up to `limit` bits from the reader as a string of
/// `0` and `1` characters, grouped by `group` bits.
pub fn render(reader: &mut BitReader<'_>, limit: usize, group: usize) -> String {
    let mut out = String::new();

    let mut count = 0;
    while count < limit {
        let Ok(bit) = reader.read_bit() else {
            break;
        };

        if group != 0 && count != 0 && count % group == 0 {
            out.push(' ');
        }
        out.push(if bit { '1' } else { '0' });

        count += 1;
    }

    out
}
