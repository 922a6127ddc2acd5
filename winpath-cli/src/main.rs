//! Main entry point for the winpath CLI.
//!
//! This is the command-line interface for the winpath library. Pure
//! commands (`classify`, `canonicalize`, `extend`, `unextend`,
//! `full-path`) work on every platform; the others query the operating
//! system and fail with a native error off Windows.

use clap::Parser;
use winpath_cli::cli::{Cli, Command};
use winpath_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = winpath::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        format: cli.format,
    };

    // Execute the command
    let result = match cli.command {
        Command::Classify(cmd) => cmd.execute(&global),
        Command::Canonicalize(cmd) => cmd.execute(&global),
        Command::Extend(cmd) => cmd.execute(&global),
        Command::Unextend(cmd) => cmd.execute(&global),
        Command::FullPath(cmd) => cmd.execute(&global),
        Command::FinalPath(cmd) => cmd.execute(&global),
        Command::VolumePath(cmd) => cmd.execute(&global),
        Command::CanonicalRoot(cmd) => cmd.execute(&global),
        Command::DriveLetter(cmd) => cmd.execute(&global),
        Command::VolumeName(cmd) => cmd.execute(&global),
        Command::VolumeInfo(cmd) => cmd.execute(&global),
        Command::MountPoints(cmd) => cmd.execute(&global),
        Command::Drives(cmd) => cmd.execute(&global),
        Command::DosDevices(cmd) => cmd.execute(&global),
        Command::Env(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
