//! Command to display information about a volume.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// Display label, serial number, limits and features of a volume.
#[derive(Args)]
pub struct VolumeInfoCommand {
    /// Root of the volume, e.g. `C:\`
    #[arg(value_name = "ROOT")]
    pub root: String,
}

impl VolumeInfoCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let info = native_services(global)?.volumes.volume_information(&self.root)?;
        emit(global.format, &info)
    }
}
