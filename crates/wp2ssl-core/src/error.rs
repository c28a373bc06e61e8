//! Error types for the migration pipeline.

use std::fmt;
use thiserror::Error;

/// External step an [`MigrationError::ExternalCommand`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SiteUrl,
    Export,
    Archive,
    SearchReplace,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::SiteUrl => "site-url",
            Step::Export => "export",
            Step::Archive => "archive",
            Step::SearchReplace => "search-replace",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum MigrationError {
    /// Site URL missing or unreadable.
    #[error("{0}")]
    Configuration(String),

    /// Site root or rewrite-rule file not writable.
    #[error("{0}")]
    Permission(String),

    #[error("{0}")]
    AlreadyMigrated(String),

    /// An external tool could not be started or returned a non-zero code.
    #[error("{message}")]
    ExternalCommand { step: Step, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MigrationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Permission(_) => "permission_error",
            Self::AlreadyMigrated(_) => "already_migrated",
            Self::ExternalCommand { .. } => "external_command_error",
            Self::Io(_) => "io_error",
        }
    }

    pub(crate) fn external(step: Step, message: impl Into<String>) -> Self {
        Self::ExternalCommand {
            step,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_command_displays_message_only() {
        let err = MigrationError::external(Step::Export, "Database export failed.");
        assert_eq!(err.to_string(), "Database export failed.");
        assert_eq!(err.code(), "external_command_error");
    }

    #[test]
    fn io_error_converts() {
        let err: MigrationError = std::io::Error::other("disk gone").into();
        assert_eq!(err.code(), "io_error");
        assert!(err.to_string().contains("disk gone"));
    }
}
