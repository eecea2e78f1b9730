//! Scene and sceneproto removal.

use tracing::debug;

use crate::error::{EntityKind, ProjectError};
use crate::project::Project;

/// What a `remove` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveKind {
    Scene,
    SceneProto,
}

/// Removal options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// Also delete the generated directories.
    pub delete_files: bool,
    /// Cascade-remove a sceneproto's dependent levels.
    pub cascade_levels: bool,
}

impl Project {
    /// Remove a scene or sceneproto from the manifest and optionally
    /// from disk.
    ///
    /// A sceneproto with dependent levels is refused unless
    /// `cascade_levels` is set; all validation happens before anything
    /// is mutated, so a refusal leaves the manifest untouched.
    pub fn remove(
        &mut self,
        kind: RemoveKind,
        name: &str,
        options: RemoveOptions,
    ) -> Result<(), ProjectError> {
        match kind {
            RemoveKind::Scene => self.remove_scene(name, options),
            RemoveKind::SceneProto => self.remove_sceneproto(name, options),
        }
    }

    fn remove_scene(&mut self, name: &str, options: RemoveOptions) -> Result<(), ProjectError> {
        let scene = match self.manifest().scenes.get(name) {
            Some(scene) => scene.clone(),
            None => {
                return Err(ProjectError::NotFound {
                    kind: EntityKind::Scene,
                    name: name.to_string(),
                })
            }
        };

        if let Some(proto_name) = &scene.sceneproto {
            if let Some(proto) = self.manifest_mut().sceneprotos.get_mut(proto_name) {
                proto.levels.retain(|level| level != name);
            }
        }
        self.manifest_mut().scenes.remove(name);
        self.regenerate_scene_list()?;

        if options.delete_files {
            self.delete_entity_dir(name, false)?;
        }
        self.save_manifest()
    }

    fn remove_sceneproto(
        &mut self,
        name: &str,
        options: RemoveOptions,
    ) -> Result<(), ProjectError> {
        let levels = match self.manifest().sceneprotos.get(name) {
            Some(proto) => proto.levels.clone(),
            None => {
                return Err(ProjectError::NotFound {
                    kind: EntityKind::SceneProto,
                    name: name.to_string(),
                })
            }
        };

        if !levels.is_empty() && !options.cascade_levels {
            return Err(ProjectError::DependentLevels {
                name: name.to_string(),
                count: levels.len(),
            });
        }

        for level in &levels {
            debug!(level, sceneproto = name, "cascade-removing level");
            self.manifest_mut().scenes.remove(level);
            if options.delete_files {
                self.delete_entity_dir(level, false)?;
            }
        }
        self.manifest_mut().sceneprotos.remove(name);
        if options.delete_files {
            self.delete_entity_dir(name, true)?;
        }
        self.regenerate_scene_list()?;
        self.save_manifest()
    }

    fn delete_entity_dir(&self, name: &str, in_proto: bool) -> Result<(), ProjectError> {
        let dir = self.entity_dir(name, in_proto);
        if dir.is_dir() {
            std::fs::remove_dir_all(&dir).map_err(|e| ProjectError::io(&dir, e))?;
        }
        Ok(())
    }
}
