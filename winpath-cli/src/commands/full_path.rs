//! Command to resolve a full path.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;
use winpath::{full_path, CurrentDirectories};

/// Resolve a path to a fully qualified path.
///
/// By default the path is resolved against the directories given on the
/// command line, without touching the file system. With `--native` the
/// operating system resolves it against the process state.
#[derive(Args)]
pub struct FullPathCommand {
    /// Path to resolve
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Process current directory
    #[arg(long, value_name = "DIR", default_value = r"C:\", conflicts_with = "native")]
    pub cwd: String,

    /// Current directory of a drive, as `X:=DIR` (repeatable)
    #[arg(long = "drive-dir", value_name = "X:=DIR", conflicts_with = "native")]
    pub drive_dirs: Vec<String>,

    /// Ask the operating system instead
    #[arg(long)]
    pub native: bool,
}

impl FullPathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolved = if self.native {
            native_services(global)?.files.full_path_name(&self.path)?
        } else {
            let directories = self.directories()?;
            full_path(&self.path, &directories)?
        };
        emit(global.format, &resolved)
    }

    fn directories(&self) -> Result<CurrentDirectories, CliError> {
        let mut directories = CurrentDirectories::new(self.cwd.as_str())?;
        for entry in &self.drive_dirs {
            let (drive, directory) = parse_drive_dir(entry)?;
            directories.set_drive_directory(drive, directory)?;
        }
        Ok(directories)
    }
}

/// Parse `C:=C:\Users` (or `C=C:\Users`) into the drive and directory.
fn parse_drive_dir(entry: &str) -> Result<(char, &str), CliError> {
    let invalid = || CliError::InvalidArguments(format!("expected X:=DIR, got '{entry}'"));

    let (drive, directory) = entry.split_once('=').ok_or_else(invalid)?;
    let mut chars = drive.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic).ok_or_else(invalid)?;
    match chars.as_str() {
        "" | ":" if !directory.is_empty() => Ok((letter, directory)),
        _ => Err(invalid()),
    }
}
