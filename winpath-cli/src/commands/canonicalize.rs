//! Command to canonicalize paths.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::GlobalOptions;
use clap::Args;
use winpath::canonicalize;

/// Canonicalize paths without consulting any current directory.
#[derive(Args)]
pub struct CanonicalizeCommand {
    /// Paths to canonicalize
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

impl CanonicalizeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let canonical: Vec<String> = self.paths.iter().map(|p| canonicalize(p)).collect();
        emit(global.format, &canonical)
    }
}
