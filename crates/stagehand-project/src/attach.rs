//! Layers, components and global components.
//!
//! These entities live on disk only; the manifest is not authoritative
//! for them. Prerequisite base files (`SceneBase.elm`,
//! `ComponentBase.elm`) are materialized lazily, keyed by file
//! existence, at most once per (scene, directory) pair.

use stagehand_templates::TemplateBatch;

use crate::error::{EntityKind, ProjectError};
use crate::project::Project;

impl Project {
    /// Add a layer to a scene or sceneproto. `with_components` renders
    /// the component-aware layer model and ensures the component base
    /// under `dir`.
    pub fn add_layer(
        &mut self,
        scene: &str,
        layer: &str,
        with_components: bool,
        dir: &str,
        with_init: bool,
        in_proto: bool,
    ) -> Result<(), ProjectError> {
        self.require_scene_home(scene, in_proto)?;
        let scene_dir = self.entity_dir(scene, in_proto);
        let layer_dir = scene_dir.join(layer);
        if layer_dir.exists() {
            return Err(ProjectError::AlreadyExists {
                kind: EntityKind::Layer,
                name: layer.to_string(),
            });
        }

        if with_components {
            self.ensure_component_base(scene, dir, in_proto)?;
        }
        self.ensure_scene_base(scene, in_proto)?;
        self.save_manifest()?;

        std::fs::create_dir_all(&layer_dir)
            .map_err(|e| ProjectError::io(&layer_dir, e))?;
        let namespace = namespace(in_proto);

        if with_init {
            TemplateBatch::new(
                vec![self.store().layer_init()],
                vec![layer_dir.join("Init.elm")],
            )?
            .var("namespace", namespace)
            .var("scene", scene)
            .var("layer", layer)
            .render()?;
        }
        let mut batch = TemplateBatch::new(
            vec![self.store().layer_model(with_components)],
            vec![layer_dir.join("Model.elm")],
        )?
        .var("namespace", namespace)
        .var("scene", scene)
        .var("layer", layer);
        if with_components {
            batch = batch.var("dir", dir);
        }
        batch.render()?;
        self.stage(&[layer_dir])
    }

    /// Add a component under `dir` in a scene or sceneproto.
    pub fn add_component(
        &mut self,
        scene: &str,
        name: &str,
        dir: &str,
        with_init: bool,
        in_proto: bool,
    ) -> Result<(), ProjectError> {
        self.require_scene_home(scene, in_proto)?;
        let component_dir = self.entity_dir(scene, in_proto).join(dir).join(name);
        if component_dir.exists() {
            return Err(ProjectError::AlreadyExists {
                kind: EntityKind::Component,
                name: name.to_string(),
            });
        }

        self.ensure_scene_base(scene, in_proto)?;
        self.ensure_component_base(scene, dir, in_proto)?;
        self.save_manifest()?;

        std::fs::create_dir_all(&component_dir)
            .map_err(|e| ProjectError::io(&component_dir, e))?;
        let namespace = namespace(in_proto);

        TemplateBatch::new(
            vec![self.store().component_model()],
            vec![component_dir.join("Model.elm")],
        )?
        .var("namespace", namespace)
        .var("scene", scene)
        .var("dir", dir)
        .var("name", name)
        .render()?;
        if with_init {
            TemplateBatch::new(
                vec![self.store().component_init()],
                vec![component_dir.join("Init.elm")],
            )?
            .var("namespace", namespace)
            .var("scene", scene)
            .var("dir", dir)
            .var("name", name)
            .render()?;
        }
        self.stage(&[component_dir])
    }

    /// Add a global component. Existence is keyed on the generated
    /// model file, not the manifest.
    pub fn add_global_component(&mut self, name: &str) -> Result<(), ProjectError> {
        let gc_dir = self.global_components_dir().join(name);
        let model = gc_dir.join("Model.elm");
        if model.exists() {
            return Err(ProjectError::AlreadyExists {
                kind: EntityKind::GlobalComponent,
                name: name.to_string(),
            });
        }
        std::fs::create_dir_all(&gc_dir).map_err(|e| ProjectError::io(&gc_dir, e))?;

        TemplateBatch::new(vec![self.store().global_component_model()], vec![model])?
            .var("name", name)
            .render()?;
        self.stage(&[gc_dir])
    }

    fn require_scene_home(&self, scene: &str, in_proto: bool) -> Result<(), ProjectError> {
        let known = if in_proto {
            self.manifest().sceneprotos.contains_key(scene)
        } else {
            self.manifest().scenes.contains_key(scene)
        };
        if known {
            Ok(())
        } else {
            Err(ProjectError::NotFound {
                kind: if in_proto {
                    EntityKind::SceneProto
                } else {
                    EntityKind::Scene
                },
                name: scene.to_string(),
            })
        }
    }

    /// Render `SceneBase.elm` for the scene if it does not exist yet.
    fn ensure_scene_base(&self, scene: &str, in_proto: bool) -> Result<(), ProjectError> {
        let target = self.entity_dir(scene, in_proto).join("SceneBase.elm");
        if target.exists() {
            return Ok(());
        }
        let template = if in_proto {
            self.store().proto_base()
        } else {
            self.store().scene_base()
        };
        TemplateBatch::new(vec![template], vec![target.clone()])?
            .var("scene", scene)
            .render()?;
        self.stage(&[target])
    }

    /// Render `ComponentBase.elm` under `dir` if it does not exist yet.
    fn ensure_component_base(
        &self,
        scene: &str,
        dir: &str,
        in_proto: bool,
    ) -> Result<(), ProjectError> {
        let component_home = self.entity_dir(scene, in_proto).join(dir);
        let target = component_home.join("ComponentBase.elm");
        if target.exists() {
            return Ok(());
        }
        std::fs::create_dir_all(&component_home)
            .map_err(|e| ProjectError::io(&component_home, e))?;
        TemplateBatch::new(vec![self.store().component_base()], vec![target.clone()])?
            .var("namespace", namespace(in_proto))
            .var("scene", scene)
            .var("dir", dir)
            .render()?;
        self.stage(&[target])
    }
}

fn namespace(in_proto: bool) -> &'static str {
    if in_proto {
        "SceneProtos"
    } else {
        "Scenes"
    }
}
