//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CanonicalRootCommand, CanonicalizeCommand, ClassifyCommand, CompletionsCommand,
    DosDevicesCommand, DriveLetterCommand, DrivesCommand, EnvCommand, ExtendCommand,
    FinalPathCommand, FullPathCommand, MountPointsCommand, UnextendCommand, VolumeInfoCommand,
    VolumeNameCommand, VolumePathCommand,
};
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting Windows paths and volumes.
#[derive(Parser)]
#[command(name = "winpath")]
#[command(version, about = "Inspect Windows paths and volumes", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file as well
    #[arg(long, value_name = "PATH", global = true, env = "WINPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the format and root of a path
    Classify(ClassifyCommand),

    /// Canonicalize paths
    Canonicalize(CanonicalizeCommand),

    /// Add the extended-length prefix
    Extend(ExtendCommand),

    /// Remove the extended-length prefix
    Unextend(UnextendCommand),

    /// Resolve a path to a fully qualified path
    FullPath(FullPathCommand),

    /// Show the final path of a file through links
    FinalPath(FinalPathCommand),

    /// Show the mount point a path lives under
    VolumePath(VolumePathCommand),

    /// Show the canonical volume root of a path
    CanonicalRoot(CanonicalRootCommand),

    /// Show the drive letter on the same volume as a path
    DriveLetter(DriveLetterCommand),

    /// Show the volume name of a mount point
    VolumeName(VolumeNameCommand),

    /// Display information about a volume
    VolumeInfo(VolumeInfoCommand),

    /// List the mount points of a volume
    MountPoints(MountPointsCommand),

    /// List logical drives
    Drives(DrivesCommand),

    /// Query DOS device aliases
    DosDevices(DosDevicesCommand),

    /// Show an environment variable
    Env(EnvCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
