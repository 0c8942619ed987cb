use std::path::PathBuf;

use bitstream::BitWriter;
use clap::Args;

use super::Command;
use crate::{
    cli::{io::write_output, HYPHEN},
    field::Field,
};

/// Subcommand for packing typed fields into a bit stream.
#[derive(Debug, Args)]
pub struct Pack {
    /// The fields to pack, in order.
    ///
    /// Supported forms are `u<N>=<V>`, `i<N>=<V>`, `s<N>=<V>`,
    /// `b=<0|1>`, `pad=<0|1>` and `str=<TEXT>`.
    #[clap(required = true)]
    fields: Vec<Field>,

    /// Where to write the packed bytes; "-" prints to stdout.
    #[clap(short, long, default_value = HYPHEN)]
    output: PathBuf,

    /// Packs into a fixed buffer of this many bytes instead of a
    /// growable one, failing when the fields do not fit.
    #[clap(short, long)]
    capacity: Option<usize>,
}

impl Command for Pack {
    fn handle(self) -> eyre::Result<()> {
        let data = match self.capacity {
            Some(capacity) => {
                let mut buf = vec![0; capacity];
                pack(&self.fields, BitWriter::fixed(&mut buf))?
            }
            None => pack(&self.fields, BitWriter::new())?,
        };

        write_output(&self.output, &data)
    }
}

/// Packs all fields through the given writer and returns the bytes.
pub fn pack(fields: &[Field], mut writer: BitWriter<'_>) -> eyre::Result<Vec<u8>> {
    for (idx, field) in fields.iter().enumerate() {
        field
            .write(&mut writer)
            .map_err(|e| eyre::eyre!("failed to pack field #{idx} ({field:?}): {e}"))?;
    }

    log::info!(
        "Packed {} fields into {} bits ({} bytes)",
        fields.len(),
        writer.bit_size(),
        writer.byte_size()
    );

    Ok(writer.into_vec())
}
