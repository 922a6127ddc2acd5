//! Command to show the mount point a path lives under.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// Show the mount point of the volume a path lives on.
#[derive(Args)]
pub struct VolumePathCommand {
    /// Path to look up
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl VolumePathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mount_point = native_services(global)?.volumes.mount_point(&self.path)?;
        emit(global.format, &mount_point)
    }
}
