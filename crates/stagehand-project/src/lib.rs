//! Project operations for Stagehand.
//!
//! A [`Project`] is the loaded manifest plus the directory tree it
//! describes. Entity mutators (scene/sceneproto/level/layer/component
//! creation and removal) compose the template store, the substitution
//! engine and incremental manifest persistence into single operations;
//! the reconciler rebuilds scene topology from the generated sources on
//! disk; the migrator recovers manifests whose schema version diverged.

pub mod attach;
pub mod error;
pub mod migrate;
pub mod project;
pub mod reconcile;
pub mod remove;
pub mod scenes;

pub use error::{EntityKind, ProjectError};
pub use project::{
    Project, GLOBAL_COMPONENTS_DIR, SCENEPROTOS_DIR, SCENES_DIR,
};
pub use reconcile::BackRef;
pub use remove::{RemoveKind, RemoveOptions};
