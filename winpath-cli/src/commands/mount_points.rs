//! Command to list the mount points of a volume.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// List every path a volume is mounted at.
#[derive(Args)]
pub struct MountPointsCommand {
    /// Volume name, `\\?\Volume{GUID}\`
    #[arg(value_name = "VOLUME")]
    pub volume: String,
}

impl MountPointsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mount_points = native_services(global)?
            .volumes
            .volume_mount_points(&self.volume)?;
        emit(global.format, &mount_points)
    }
}
