//! Command to remove the extended-length prefix.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::GlobalOptions;
use clap::Args;
use winpath::remove_extended_prefix;

/// Remove the `\\?\` prefix, turning `\\?\UNC\` back into `\\`.
#[derive(Args)]
pub struct UnextendCommand {
    /// Path to unextend
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl UnextendCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let plain = remove_extended_prefix(&self.path).into_owned();
        emit(global.format, &plain)
    }
}
