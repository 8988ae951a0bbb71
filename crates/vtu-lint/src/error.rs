//! Error types for the lint engine.

use thiserror::Error;

/// Errors that can occur while linting a file.
#[derive(Debug, Error)]
pub enum Error {
    /// No Vue Test Utils version could be determined.
    ///
    /// Version-dependent rules refuse to guess; the user must either install
    /// `@vue/test-utils` where it can be found or set the version explicitly
    /// in the settings.
    #[error(
        "Unable to detect installed VTU version. Please ensure @vue/test-utils \
         is installed, or set the version explicitly."
    )]
    VersionUndetectable,

    /// The configured version string is not valid semver.
    #[error("Invalid VTU version in settings: {0}")]
    InvalidVersion(String),

    /// The source file could not be parsed at all.
    #[error("Failed to parse JavaScript source{}", match .0 { Some(f) => format!(": {f}"), None => String::new() })]
    Parse(Option<String>),

    /// File system error (version detection, module resolution).
    #[error("File system error: {0}")]
    FileSystem(String),
}

pub type Result<T> = std::result::Result<T, Error>;
