//! Fixed layout of the template store checkout.

use std::path::{Path, PathBuf};

/// Hidden directory holding the template checkout at the project root.
pub const STORE_DIR: &str = ".stagehand";

/// Path index over the `.stagehand` checkout.
///
/// The checkout layout is a convention of the template repository:
/// `scene/`, `sceneproto/`, `component/` and `layer/` subtrees for
/// entity scaffolding, plus `src/` and `public/` used once by `init`.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Store for the project rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(STORE_DIR),
        }
    }

    /// Checkout directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the checkout exists on disk.
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// `Init.elm` template shared by scenes and sceneprotos.
    pub fn scene_init(&self) -> PathBuf {
        self.dir.join("scene/Init.elm")
    }

    /// Scene model template; `raw` selects the layer-less variant.
    pub fn scene_model(&self, raw: bool) -> PathBuf {
        if raw {
            self.dir.join("scene/Raw/Model.elm")
        } else {
            self.dir.join("scene/Layered/Model.elm")
        }
    }

    /// Scene-base template for plain scenes.
    pub fn scene_base(&self) -> PathBuf {
        self.dir.join("scene/SceneBase.elm")
    }

    /// Scene-list template (`AllScenes.elm`).
    pub fn scene_list(&self) -> PathBuf {
        self.dir.join("scene/AllScenes.elm")
    }

    /// Sceneproto model template.
    pub fn proto_model(&self, raw: bool) -> PathBuf {
        if raw {
            self.dir.join("sceneproto/Raw/Model.elm")
        } else {
            self.dir.join("sceneproto/Layered/Model.elm")
        }
    }

    /// Scene-base template for sceneprotos.
    pub fn proto_base(&self) -> PathBuf {
        self.dir.join("sceneproto/SceneBase.elm")
    }

    /// Level template instantiating a sceneproto.
    pub fn proto_level(&self, raw: bool) -> PathBuf {
        if raw {
            self.dir.join("sceneproto/Raw/Level.elm")
        } else {
            self.dir.join("sceneproto/Layered/Level.elm")
        }
    }

    /// Component-base template.
    pub fn component_base(&self) -> PathBuf {
        self.dir.join("component/ComponentBase.elm")
    }

    /// User component model template.
    pub fn component_model(&self) -> PathBuf {
        self.dir.join("component/UserComponent/Model.elm")
    }

    /// Component `Init.elm` template.
    pub fn component_init(&self) -> PathBuf {
        self.dir.join("component/Init.elm")
    }

    /// Global component model template.
    pub fn global_component_model(&self) -> PathBuf {
        self.dir.join("component/GlobalComponent/Model.elm")
    }

    /// Layer `Init.elm` template.
    pub fn layer_init(&self) -> PathBuf {
        self.dir.join("layer/Init.elm")
    }

    /// Layer model template; `with_components` selects the
    /// component-aware variant.
    pub fn layer_model(&self, with_components: bool) -> PathBuf {
        if with_components {
            self.dir.join("layer/ModelC.elm")
        } else {
            self.dir.join("layer/Model.elm")
        }
    }

    /// Runtime source tree copied verbatim by `init`.
    pub fn runtime_src(&self) -> PathBuf {
        self.dir.join("src")
    }

    /// Public web assets copied by `init`.
    pub fn public(&self) -> PathBuf {
        self.dir.join("public")
    }

    /// Project scaffolding file shipped with the templates.
    pub fn project_file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_selection_is_flag_driven() {
        let store = TemplateStore::new("/proj");
        assert!(store.scene_model(true).ends_with("scene/Raw/Model.elm"));
        assert!(store.scene_model(false).ends_with("scene/Layered/Model.elm"));
        assert!(store.proto_level(true).ends_with("sceneproto/Raw/Level.elm"));
        assert!(store.layer_model(true).ends_with("layer/ModelC.elm"));
        assert!(store.layer_model(false).ends_with("layer/Model.elm"));
    }

    #[test]
    fn test_store_is_hidden_dir_under_root() {
        let store = TemplateStore::new("/proj");
        assert_eq!(store.dir(), Path::new("/proj/.stagehand"));
    }
}
