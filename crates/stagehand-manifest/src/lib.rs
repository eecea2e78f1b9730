//! Manifest model for Stagehand projects.
//!
//! The manifest (`stagehand.json` at the project root) is the persisted
//! record of scene/sceneproto topology. Layers and components are not
//! tracked here; their existence is derived from the filesystem.

pub mod model;
pub mod names;

pub use model::{
    Manifest, ManifestError, Scene, SceneProto, TemplateRepo, MANIFEST_FILE, SCHEMA_VERSION,
};
pub use names::normalize;
