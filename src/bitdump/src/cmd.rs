pub mod dump;

pub mod pack;

pub mod unpack;

/// A command that can be run from the command line.
pub trait Command {
    /// Runs the command to completion.
    fn handle(self) -> eyre::Result<()>;
}
