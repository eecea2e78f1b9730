//! Manifest types and persistence.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Manifest schema version accepted by this build of the tool.
///
/// A manifest recorded with any other version is rejected on load; the
/// `update` command re-derives the manifest and re-stamps it with this
/// value.
pub const SCHEMA_VERSION: &str = "1.2.0";

/// Well-known manifest file name at the project root.
pub const MANIFEST_FILE: &str = "stagehand.json";

/// Manifest loading and persistence errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{MANIFEST_FILE} not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("manifest schema version {found} does not match the expected {expected}")]
    VersionMismatch { found: String, expected: String },

    #[error("failed to access manifest: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("invalid manifest JSON: {message}")]
    Parse { message: String },
}

/// The template repository the `.stagehand` checkout was cloned from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRepo {
    /// Clone URL. Blank when detection failed during `update`.
    pub url: String,
    /// Tag or branch to clone. Blank means the default branch.
    #[serde(default)]
    pub tag: String,
}

/// A scene entry. A scene instantiated from a sceneproto (a "level")
/// carries the prototype's name and must appear in that prototype's
/// `levels` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Whether the scene was generated from the raw (layer-less) template.
    #[serde(default)]
    pub raw: bool,
    /// Owning sceneproto, if this scene is a level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sceneproto: Option<String>,
}

/// A sceneproto entry and the levels instantiated from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneProto {
    /// Whether the prototype uses the raw (layer-less) template.
    #[serde(default)]
    pub raw: bool,
    /// Names of scenes instantiated from this prototype, in creation
    /// order (directory-listing order after a reconcile).
    #[serde(default)]
    pub levels: Vec<String>,
}

/// Root manifest document.
///
/// Maps are `BTreeMap` so that serialization is deterministic; running
/// the reconciler twice over an unchanged tree must produce
/// byte-identical files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Recorded schema version, checked against [`SCHEMA_VERSION`].
    pub version: String,
    /// Template store origin.
    pub template_repo: TemplateRepo,
    /// Whether mutating commands stage and commit generated files.
    #[serde(default)]
    pub auto_commit: bool,
    /// Scene entries by name.
    #[serde(default)]
    pub scenes: BTreeMap<String, Scene>,
    /// Sceneproto entries by name.
    #[serde(default)]
    pub sceneprotos: BTreeMap<String, SceneProto>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            template_repo: TemplateRepo::default(),
            auto_commit: false,
            scenes: BTreeMap::new(),
            sceneprotos: BTreeMap::new(),
        }
    }
}

impl Manifest {
    /// Path of the manifest file inside `root`.
    pub fn path_in(root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(MANIFEST_FILE)
    }

    /// Load the manifest from `root`, enforcing the schema version gate.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let manifest = Self::load_unchecked(root)?;
        if manifest.version != SCHEMA_VERSION {
            return Err(ManifestError::VersionMismatch {
                found: manifest.version,
                expected: SCHEMA_VERSION.to_string(),
            });
        }
        Ok(manifest)
    }

    /// Load the manifest without the version gate.
    ///
    /// Only the migrator recovery path uses this; every ordinary
    /// operation goes through [`Manifest::load`].
    pub fn load_unchecked(root: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = Self::path_in(root);
        if !path.is_file() {
            return Err(ManifestError::NotFound { path });
        }
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| ManifestError::Parse {
            message: e.to_string(),
        })
    }

    /// Write the manifest to `root` with fixed 4-space indentation.
    pub fn save(&self, root: impl AsRef<Path>) -> Result<(), ManifestError> {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser).map_err(|e| ManifestError::Parse {
            message: e.to_string(),
        })?;
        buf.push(b'\n');
        std::fs::write(Self::path_in(root), buf)?;
        Ok(())
    }

    /// Whether `name` is taken in either namespace. Scenes and
    /// sceneprotos share one logical namespace.
    pub fn contains_name(&self, name: &str) -> bool {
        self.scenes.contains_key(name) || self.sceneprotos.contains_key(name)
    }
}
