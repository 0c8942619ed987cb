use clap::{Parser, Subcommand};

use crate::cmd::*;

mod args;

pub mod io;

pub const HYPHEN: &str = "-";

/// The CLI interface for the bitdump application.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The selected command.
    #[clap(subcommand)]
    pub command: BitdumpCommand,

    #[clap(flatten)]
    pub verbosity: args::Verbosity,
}

/// The top-level commands supported by bitdump.
#[derive(Debug, Subcommand)]
pub enum BitdumpCommand {
    Dump(dump::Dump),
    Pack(pack::Pack),
    Unpack(unpack::Unpack),
}

impl Command for BitdumpCommand {
    fn handle(self) -> eyre::Result<()> {
        match self {
            Self::Dump(dump) => dump.handle(),
            Self::Pack(pack) => pack.handle(),
            Self::Unpack(unpack) => unpack.handle(),
        }
    }
}
