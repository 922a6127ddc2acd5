//! Command to show how a path is classified.

use crate::error::CliError;
use crate::output::{emit, Report};
use crate::utils::GlobalOptions;
use clap::Args;
use serde::Serialize;
use winpath::path::classify;
use winpath::PathFormat;

/// Show the format and root of a path.
#[derive(Args)]
pub struct ClassifyCommand {
    /// Path to classify
    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(Serialize)]
struct Classification<'a> {
    path: &'a str,
    format: PathFormat,
    root: &'a str,
    root_length: usize,
    is_relative: bool,
    is_device: bool,
}

impl Report for Classification<'_> {
    fn text_lines(&self) -> Vec<String> {
        vec![
            format!("format: {}", self.format),
            format!("root: {}", self.root),
            format!("root length: {}", self.root_length),
            format!("relative: {}", self.is_relative),
            format!("device: {}", self.is_device),
        ]
    }
}

impl ClassifyCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let parsed = classify(&self.path);
        let report = Classification {
            path: &self.path,
            format: parsed.format,
            root: parsed.root(&self.path),
            root_length: parsed.root_length,
            is_relative: parsed.is_relative,
            is_device: parsed.is_device,
        };
        emit(global.format, &report)
    }
}
