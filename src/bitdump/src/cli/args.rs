use clap::{ArgAction, Args};
use log::LevelFilter;

/// Logging options shared by all commands.
#[derive(Clone, Copy, Debug, Args)]
pub struct Verbosity {
    /// Increases log output; `-v` is Debug, `-vv` is Trace.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only logs warnings and errors.
    #[clap(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Verbosity {
    /// Installs the global logger at the selected level.
    pub fn setup(self) -> eyre::Result<()> {
        simple_logger::SimpleLogger::new()
            .with_level(self.level_filter())
            .init()?;

        Ok(())
    }

    fn level_filter(self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}
