//! Project operation errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use stagehand_external::ExternalError;
use stagehand_manifest::ManifestError;
use stagehand_templates::TemplateError;
use thiserror::Error;

/// Kinds of entities the mutators operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Scene,
    SceneProto,
    Level,
    Layer,
    Component,
    GlobalComponent,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scene => "scene",
            Self::SceneProto => "sceneproto",
            Self::Level => "level",
            Self::Layer => "layer",
            Self::Component => "component",
            Self::GlobalComponent => "global component",
        };
        f.write_str(label)
    }
}

/// Errors raised by project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: EntityKind, name: String },

    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    #[error("sceneproto {name} still has {count} level(s) using it; remove them first")]
    DependentLevels { name: String, count: usize },

    #[error("work tree has uncommitted changes; commit or stash them first\n{details}")]
    DirtyWorkTree { details: String },

    #[error("template store missing and no template_repo.url recorded in the manifest")]
    TemplateStoreUnavailable,

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    External(#[from] ExternalError),

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProjectError {
    /// Wrap an io error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
