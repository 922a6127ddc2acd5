//! CLI command implementations.
//!
//! Pure commands work on any platform:
//! - `classify`: Show the format and root of a path
//! - `canonicalize`: Canonicalize paths
//! - `extend` / `unextend`: Add or remove the `\\?\` prefix
//! - `full_path`: Resolve a path against explicit current directories
//!
//! Native commands query the operating system:
//! - `final_path`: Final path through links
//! - `volume_path`: Mount point a path lives under
//! - `canonical_root`: Stable volume identity of a path
//! - `drive_letter`: Drive letter mapping to the volume of a path
//! - `volume_name`: Volume GUID name of a mount point
//! - `volume_info`: Label, serial and features of a volume
//! - `mount_points`: Mount points of a volume
//! - `drives`: Logical drives
//! - `dos_devices`: DOS device aliases
//! - `env`: Environment variable lookup
//!
//! And `completions` generates shell completion scripts.

pub mod canonical_root;
pub mod canonicalize;
pub mod classify;
pub mod completions;
pub mod dos_devices;
pub mod drive_letter;
pub mod drives;
pub mod env;
pub mod extend;
pub mod final_path;
pub mod full_path;
pub mod mount_points;
pub mod unextend;
pub mod volume_info;
pub mod volume_name;
pub mod volume_path;

pub use canonical_root::CanonicalRootCommand;
pub use canonicalize::CanonicalizeCommand;
pub use classify::ClassifyCommand;
pub use completions::CompletionsCommand;
pub use dos_devices::DosDevicesCommand;
pub use drive_letter::DriveLetterCommand;
pub use drives::DrivesCommand;
pub use env::EnvCommand;
pub use extend::ExtendCommand;
pub use final_path::FinalPathCommand;
pub use full_path::FullPathCommand;
pub use mount_points::MountPointsCommand;
pub use unextend::UnextendCommand;
pub use volume_info::VolumeInfoCommand;
pub use volume_name::VolumeNameCommand;
pub use volume_path::VolumePathCommand;
