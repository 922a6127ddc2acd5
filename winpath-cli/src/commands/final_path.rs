//! Command to show the final path of a file through links.

use crate::error::CliError;
use crate::output::emit;
use crate::utils::{native_services, GlobalOptions};
use clap::{Args, ValueEnum};
use winpath::FinalPathFlags;

/// How the volume part of a final path is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VolumeNameStyle {
    /// Drive letter (`\\?\C:\...`)
    Dos,
    /// Volume GUID (`\\?\Volume{...}\...`)
    Guid,
    /// NT device (`\Device\HarddiskVolume1\...`)
    Nt,
    /// No volume (`\...`)
    None,
}

impl VolumeNameStyle {
    fn flags(self) -> FinalPathFlags {
        match self {
            Self::Dos => FinalPathFlags::VOLUME_NAME_DOS,
            Self::Guid => FinalPathFlags::VOLUME_NAME_GUID,
            Self::Nt => FinalPathFlags::VOLUME_NAME_NT,
            Self::None => FinalPathFlags::VOLUME_NAME_NONE,
        }
    }
}

/// Show the final path of an existing file or directory.
#[derive(Args)]
pub struct FinalPathCommand {
    /// Path to resolve
    #[arg(value_name = "PATH")]
    pub path: String,

    /// How to write the volume
    #[arg(long, value_enum, default_value_t = VolumeNameStyle::Dos)]
    pub volume_name: VolumeNameStyle,

    /// Report the name as opened rather than normalized
    #[arg(long)]
    pub opened: bool,

    /// Do not follow a final symbolic link
    #[arg(long)]
    pub no_follow: bool,
}

impl FinalPathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut flags = self.volume_name.flags();
        if self.opened {
            flags |= FinalPathFlags::FILE_NAME_OPENED;
        }

        let services = native_services(global)?;
        let resolved = services
            .files
            .final_path_name(&self.path, flags, !self.no_follow)?;
        emit(global.format, &resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_name_flags() {
        assert_eq!(VolumeNameStyle::Dos.flags(), FinalPathFlags::empty());
        assert_eq!(VolumeNameStyle::Guid.flags().bits(), 0x1);
        assert_eq!(VolumeNameStyle::Nt.flags().bits(), 0x2);
        assert_eq!(VolumeNameStyle::None.flags().bits(), 0x4);
    }
}
