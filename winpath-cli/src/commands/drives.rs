//! Command to list logical drives.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// List the logical drives.
#[derive(Args)]
pub struct DrivesCommand {}

impl DrivesCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let drives = native_services(global)?.volumes.logical_drive_strings()?;
        emit(global.format, &drives)
    }
}
