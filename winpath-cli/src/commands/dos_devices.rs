//! Command to query DOS device aliases.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// Show the targets of a DOS device alias, or every alias.
#[derive(Args)]
pub struct DosDevicesCommand {
    /// Alias such as `C:` or `COM1`; omit to list every alias
    #[arg(value_name = "ALIAS")]
    pub alias: Option<String>,
}

impl DosDevicesCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let names = native_services(global)?
            .volumes
            .query_dos_device_names(self.alias.as_deref())?;
        emit(global.format, &names)
    }
}
