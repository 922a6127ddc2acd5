//! Output formatting for command results.
//!
//! Every command produces a [`Report`]. In text mode a report prints one
//! value per line; in JSON mode it prints a single JSON document.

use std::io;

use clap::ValueEnum;
use serde::Serialize;
use winpath::VolumeInformation;

use crate::error::CliError;

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Text,
    /// A JSON document.
    Json,
}

/// A command result that can be rendered in every [`OutputFormat`].
pub trait Report: Serialize {
    /// The text rendering, one entry per output line.
    fn text_lines(&self) -> Vec<String>;
}

impl Report for String {
    fn text_lines(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl Report for Vec<String> {
    fn text_lines(&self) -> Vec<String> {
        self.clone()
    }
}

impl Report for VolumeInformation {
    fn text_lines(&self) -> Vec<String> {
        vec![
            format!("root: {}", self.root_path_name),
            format!("label: {}", self.volume_name),
            format!("serial: {:08X}", self.volume_serial_number),
            format!("max component length: {}", self.maximum_component_length),
            format!("file system: {}", self.file_system_name),
            format!("flags: {:#010x}", self.file_system_flags.bits()),
        ]
    }
}

impl OutputFormat {
    /// Render `report` as the final output string.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if JSON serialization fails.
    pub fn render<R: Report + ?Sized>(self, report: &R) -> Result<String, CliError> {
        match self {
            Self::Text => Ok(report.text_lines().join("\n")),
            Self::Json => serde_json::to_string_pretty(report)
                .map_err(|e| CliError::Io(io::Error::from(e))),
        }
    }
}

/// Render `report` and print it to stdout.
pub fn emit<R: Report + ?Sized>(format: OutputFormat, report: &R) -> Result<(), CliError> {
    println!("{}", format.render(report)?);
    Ok(())
}
