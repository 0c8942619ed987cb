use std::{
    fs,
    io::{self, IsTerminal, Read, Write},
    path::Path,
    process,
};

use clap::CommandFactory;

use super::{Cli, HYPHEN};

/// Reads all bytes from the given input path.
///
/// When the path is "-", stdin is read instead. This terminates the
/// process and prints the help text if stdin is connected to a terminal.
pub fn read_input(path: &Path) -> eyre::Result<Vec<u8>> {
    if path.as_os_str() != HYPHEN {
        log::debug!("Reading input from '{}'", path.display());
        return Ok(fs::read(path)?);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let _ = Cli::command().print_help();
        process::exit(2);
    }

    let mut buf = Vec::new();
    stdin.lock().read_to_end(&mut buf)?;

    Ok(buf)
}

/// Writes `data` to the given output path, or stdout for "-".
pub fn write_output(path: &Path, data: &[u8]) -> eyre::Result<()> {
    if path.as_os_str() == HYPHEN {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()?;
    } else {
        log::debug!("Writing {} bytes to '{}'", data.len(), path.display());
        fs::write(path, data)?;
    }

    Ok(())
}
