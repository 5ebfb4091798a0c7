//! Invocations of the external string-extraction tools.
//!
//! Both tools run blocking and synchronous; their output directories are
//! fully populated before any parsing starts. A non-zero exit is fatal for
//! the run, so no partially merged table is ever committed.

use std::path::{Path, PathBuf};
use std::process::Command;

use stringsync::Error;
use tracing::debug;

/// Runs `genstrings -u -o <out_dir> <sources...>` once for the whole run.
///
/// genstrings writes one `.strings` file per table name found in the
/// sources.
pub fn run_genstrings(sources: &[PathBuf], out_dir: &Path) -> Result<(), Error> {
    let mut command = Command::new("genstrings");
    command.arg("-u").arg("-o").arg(out_dir).args(sources);
    run(command, "genstrings")
}

/// Exports the strings of a single interface file with
/// `ibtool --export-strings-file`.
pub fn run_ibtool(interface_file: &Path, export_path: &Path) -> Result<(), Error> {
    let mut command = Command::new("ibtool");
    command
        .arg("--export-strings-file")
        .arg(export_path)
        .arg(interface_file);
    run(command, "ibtool")
}

fn run(mut command: Command, tool: &str) -> Result<(), Error> {
    debug!(?command, "running extraction tool");
    let output = command
        .output()
        .map_err(|source| Error::extractor(tool, source.to_string()))?;
    if !output.status.success() {
        return Err(Error::extractor(
            tool,
            format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ));
    }
    Ok(())
}
