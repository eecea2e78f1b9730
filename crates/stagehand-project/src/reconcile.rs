//! Filesystem reconciler.
//!
//! Rebuilds the scenes/sceneprotos portion of the manifest purely from
//! the generated sources on disk. The sceneprotos pass runs first so
//! that the scenes pass can append level back-references to
//! `proto.levels`.

use std::path::{Path, PathBuf};

use regex::Regex;
use stagehand_manifest::{Scene, SceneProto};
use tracing::warn;

use crate::error::ProjectError;
use crate::project::Project;

/// Generated file recognized at the top of a scene/sceneproto directory.
const MODEL_FILE: &str = "Model.elm";

/// Marker substring meaning "this scene was instantiated from a
/// prototype".
const LEVEL_MARKER: &str = "LevelInit";

/// Marker substring meaning "this entity uses the raw template".
const RAW_MARKER: &str = "import Stagehand.Scene.RawScene";

/// Classification of a scene's prototype back-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackRef {
    /// Level marker present and the prototype import line parsed.
    Linked(String),
    /// Level marker present but no recognizable import line. Tolerated:
    /// the link is skipped with a warning.
    Unparsable,
    /// No level marker; a plain scene.
    Absent,
}

/// Classify the back-reference of a generated scene model.
pub fn classify_back_ref(content: &str) -> BackRef {
    if !content.contains(LEVEL_MARKER) {
        return BackRef::Absent;
    }
    let pattern = Regex::new(r"import SceneProtos\.(\w+)\.Model").unwrap();
    match pattern.captures(content) {
        Some(cap) => BackRef::Linked(cap[1].to_string()),
        None => BackRef::Unparsable,
    }
}

impl Project {
    /// Rebuild `scenes` and `sceneprotos` from the directory tree,
    /// discarding their prior content. The rest of the manifest is
    /// untouched. The caller persists the result.
    pub fn reconcile(&mut self) -> Result<(), ProjectError> {
        self.manifest_mut().scenes.clear();
        self.manifest_mut().sceneprotos.clear();

        let protos_dir = self.sceneprotos_dir();
        if protos_dir.is_dir() {
            for (name, content) in scan_entities(&protos_dir)? {
                let raw = content.contains(RAW_MARKER);
                self.manifest_mut().sceneprotos.insert(
                    name,
                    SceneProto {
                        raw,
                        levels: Vec::new(),
                    },
                );
            }
        }

        let scenes_dir = self.scenes_dir();
        if !scenes_dir.is_dir() {
            std::fs::create_dir_all(&scenes_dir)
                .map_err(|e| ProjectError::io(&scenes_dir, e))?;
        }
        for (name, content) in scan_entities(&scenes_dir)? {
            let raw = content.contains(RAW_MARKER);
            let sceneproto = match classify_back_ref(&content) {
                BackRef::Linked(proto) => {
                    match self.manifest_mut().sceneprotos.get_mut(&proto) {
                        Some(entry) => {
                            entry.levels.push(name.clone());
                            Some(proto)
                        }
                        None => {
                            warn!(scene = %name, sceneproto = %proto,
                                "level references a sceneproto that is not on disk, skipping link");
                            None
                        }
                    }
                }
                BackRef::Unparsable => {
                    warn!(scene = %name,
                        "level marker present but prototype import not recognized, skipping link");
                    None
                }
                BackRef::Absent => None,
            };
            self.manifest_mut()
                .scenes
                .insert(name, Scene { raw, sceneproto });
        }
        Ok(())
    }
}

/// List recognized entity directories under `dir` in lexicographic path
/// order, returning each directory name with its model file content.
/// Entries without a model file are silently skipped.
fn scan_entities(dir: &Path) -> Result<Vec<(String, String)>, ProjectError> {
    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| ProjectError::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    let mut entities = Vec::new();
    for subdir in subdirs {
        let model = subdir.join(MODEL_FILE);
        if !model.is_file() {
            continue;
        }
        let Some(name) = subdir.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let content =
            std::fs::read_to_string(&model).map_err(|e| ProjectError::io(&model, e))?;
        entities.push((name, content));
    }
    Ok(entities)
}
