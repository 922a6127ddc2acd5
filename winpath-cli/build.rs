//! Build script for winpath-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("winpath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect Windows paths and volumes")
        .long_about(
            "Command-line tool for classifying and canonicalizing Windows paths and resolving volumes",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file as well")
                .value_name("PATH")
                .global(true)
                .env("WINPATH_CONFIG"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text")
                .global(true),
        )
        .subcommands(vec![
            Command::new("classify")
                .about("Show the format and root of a path")
                .long_about("Classify a path as drive, UNC, extended, device or relative"),
            Command::new("canonicalize")
                .about("Canonicalize paths")
                .long_about("Collapse dot segments and trailing dots and spaces without any I/O"),
            Command::new("extend")
                .about("Add the extended-length prefix")
                .long_about("Add \\\\?\\ to paths longer than MAX_PATH, or always with --force"),
            Command::new("unextend")
                .about("Remove the extended-length prefix")
                .long_about("Remove \\\\?\\ and turn \\\\?\\UNC\\ back into \\\\"),
            Command::new("full-path")
                .about("Resolve a path to a fully qualified path")
                .long_about(
                    "Resolve against explicit current directories, or the OS with --native",
                ),
            Command::new("final-path")
                .about("Show the final path of a file through links")
                .long_about("Follow symbolic links and junctions to the final path"),
            Command::new("volume-path")
                .about("Show the mount point a path lives under")
                .long_about("Display the root of the volume containing a path"),
            Command::new("canonical-root")
                .about("Show the canonical volume root of a path")
                .long_about("Display the volume GUID root or simplified UNC root of a path"),
            Command::new("drive-letter")
                .about("Show the drive letter on the same volume as a path")
                .long_about("Scan logical drives for one with the same canonical root"),
            Command::new("volume-name")
                .about("Show the volume name of a mount point")
                .long_about("Display the \\\\?\\Volume{GUID}\\ name mounted at a mount point"),
            Command::new("volume-info")
                .about("Display information about a volume")
                .long_about("Show label, serial number, limits and file system features"),
            Command::new("mount-points")
                .about("List the mount points of a volume")
                .long_about("List every path a volume is mounted at"),
            Command::new("drives")
                .about("List logical drives")
                .long_about("List the root of every logical drive"),
            Command::new("dos-devices")
                .about("Query DOS device aliases")
                .long_about("Show the targets of an alias, or every alias"),
            Command::new("env")
                .about("Show an environment variable")
                .long_about("Read an environment variable, including hidden =X: drive entries"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("winpath.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
