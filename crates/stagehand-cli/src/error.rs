//! CLI error handling and exit codes.

use std::io;

use stagehand_external::ExternalError;
use stagehand_manifest::ManifestError;
use stagehand_project::ProjectError;
use thiserror::Error;

/// CLI error type. Every variant maps to a stable exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Tool { message: String },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("aborted by user")]
    Cancelled,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::User { .. } => 1,
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::Tool { .. } => 8,
            Self::Cancelled => 130,
            Self::Other(_) => 1,
        }
    }

    /// Hint for this error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::User { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Create a user error.
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a user error with a hint.
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<ManifestError> for CliError {
    fn from(err: ManifestError) -> Self {
        let hint = match &err {
            ManifestError::NotFound { .. } => Some(
                "are you inside a Stagehand project? Try `stagehand init <your-project-name>`"
                    .to_string(),
            ),
            ManifestError::VersionMismatch { .. } => Some(
                "run `stagehand update` to re-derive the manifest, or edit stagehand.json manually"
                    .to_string(),
            ),
            _ => None,
        };
        Self::Config {
            message: err.to_string(),
            hint,
        }
    }
}

impl From<ExternalError> for CliError {
    fn from(err: ExternalError) -> Self {
        Self::Tool {
            message: err.to_string(),
        }
    }
}

impl From<ProjectError> for CliError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::AlreadyExists { .. }
            | ProjectError::DependentLevels { .. }
            | ProjectError::DirtyWorkTree { .. } => Self::Validation {
                message: err.to_string(),
            },
            ProjectError::NotFound { .. } => Self::NotFound {
                message: err.to_string(),
            },
            ProjectError::Manifest(err) => err.into(),
            ProjectError::External(err) => err.into(),
            ProjectError::Template(err) => Self::Config {
                message: err.to_string(),
                hint: Some(
                    "the template checkout may be stale; delete .stagehand and re-run".to_string(),
                ),
            },
            ProjectError::TemplateStoreUnavailable => Self::Config {
                message: err.to_string(),
                hint: Some("set template_repo.url in stagehand.json".to_string()),
            },
            ProjectError::Io { .. } => Self::Io {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_exit_code_5() {
        let err: CliError = ProjectError::DependentLevels {
            name: "Boss".to_string(),
            count: 2,
        }
        .into();
        assert!(matches!(err, CliError::Validation { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_missing_manifest_gets_init_hint() {
        let err: CliError = ManifestError::NotFound {
            path: "stagehand.json".into(),
        }
        .into();
        assert!(err.hint().unwrap().contains("stagehand init"));
    }

    #[test]
    fn test_version_mismatch_gets_update_hint() {
        let err: CliError = ManifestError::VersionMismatch {
            found: "0.9.0".to_string(),
            expected: "1.2.0".to_string(),
        }
        .into();
        assert!(err.hint().unwrap().contains("stagehand update"));
    }
}
