//! CLI-specific error types and exit codes.

use thiserror::Error;
use tubepull_browse::BrowseError;
use tubepull_core::{BrowsePortError, DownloadError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input could not be understood.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration or client setup failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Walking the collection failed; nothing was downloaded.
    #[error("Collection discovery failed: {0}")]
    Discovery(#[from] BrowsePortError),

    /// The single requested item failed.
    #[error("Download failed: {0}")]
    Download(DownloadError),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits:
    /// - 1: Discovery or download failure
    /// - 2: Invalid arguments (EX_USAGE)
    /// - 78: Configuration error (EX_CONFIG)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Discovery(_) | Self::Download(_) => 1,
            Self::Arguments(_) => 2,
            Self::Config(_) => 78,
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::InvalidConfig { message } => Self::Config(message),
            other => Self::Download(other),
        }
    }
}

impl From<BrowseError> for CliError {
    fn from(err: BrowseError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
        assert_eq!(
            CliError::from(BrowsePortError::MalformedResponse {
                message: "bad".into()
            })
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_invalid_config_maps_to_config() {
        let err = CliError::from(DownloadError::invalid_config("workers must be at least 1"));
        assert!(matches!(err, CliError::Config(_)));

        let err = CliError::from(DownloadError::Cancelled);
        assert!(matches!(err, CliError::Download(DownloadError::Cancelled)));
    }
}
