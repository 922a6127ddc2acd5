//! Command to show the canonical root of a path.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::Args;

/// Show the stable volume identity of an absolute path.
///
/// Local paths map to their `\\?\Volume{GUID}\` name, network paths to
/// `\\server\share\`.
#[derive(Args)]
pub struct CanonicalRootCommand {
    /// Absolute path
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl CanonicalRootCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = native_services(global)?.volumes.canonical_root(&self.path)?;
        emit(global.format, &root)
    }
}
