//! Command to find the drive letter of a volume.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// Show the logical drive on the same volume as a path.
///
/// Exits with status 1 when no drive maps to the volume.
#[derive(Args)]
pub struct DriveLetterCommand {
    /// Absolute path or volume name
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl DriveLetterCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match native_services(global)?.volumes.drive_letter(&self.path)? {
            Some(drive) => emit(global.format, &drive),
            None => Err(CliError::SemanticFailure(format!(
                "no drive letter maps to the volume of '{}'",
                self.path
            ))),
        }
    }
}
