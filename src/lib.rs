// Re-export core types and functions
pub mod build_info;
pub mod checksum;
pub mod clock;
pub mod emit;
pub mod error;
mod generator;
pub mod git;
pub mod record;

// Re-export checksum types
pub use checksum::{ChecksumError, ChecksumManifest, ManifestEntry};

// Re-export clock types
pub use clock::{BuildClock, SystemClock};

// Re-export error types
pub use error::{Error, Result};

// Re-export generation entry points
pub use generator::{build_record, generate, write_version_file, LOADGEN_VERSION};

// Re-export git probe types
pub use git::{GitInfo, GitLocation, GitProbe, GitRunner, RunOutput, SystemGitRunner, GIT_NA};

// Re-export record types
pub use record::{Accessor, CppLiteral, RecordError, VersionRecord};
