//! Command to add the extended-length prefix.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::GlobalOptions;
use clap::Args;
use winpath::add_extended_prefix;

/// Add the `\\?\` prefix to a path longer than the legacy limit.
#[derive(Args)]
pub struct ExtendCommand {
    /// Path to extend
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Add the prefix even if the path is short enough without it
    #[arg(long)]
    pub force: bool,
}

impl ExtendCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let extended = add_extended_prefix(&self.path, self.force).into_owned();
        emit(global.format, &extended)
    }
}
