//! Command to show the volume name of a mount point.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// Show the `\\?\Volume{GUID}\` name of the volume mounted at a mount point.
#[derive(Args)]
pub struct VolumeNameCommand {
    /// Mount point, e.g. `C:\` or `C:\mnt\data\`
    #[arg(value_name = "MOUNT_POINT")]
    pub mount_point: String,
}

impl VolumeNameCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let name = native_services(global)?.volumes.volume_name(&self.mount_point)?;
        emit(global.format, &name)
    }
}
