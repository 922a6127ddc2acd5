//! Command to read an environment variable through the native API.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// Show the value of an environment variable.
///
/// Hidden per-drive directories can be read as `=C:`. Exits with status 1
/// when the variable is not set.
#[derive(Args)]
pub struct EnvCommand {
    /// Variable name
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl EnvCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match native_services(global)?.files.environment_variable(&self.name)? {
            Some(value) => emit(global.format, &value),
            None => Err(CliError::SemanticFailure(format!(
                "environment variable '{}' is not set",
                self.name
            ))),
        }
    }
}
