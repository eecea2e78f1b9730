//! Scene, sceneproto and level creation.

use stagehand_manifest::{Scene, SceneProto};
use stagehand_templates::TemplateBatch;

use crate::error::{EntityKind, ProjectError};
use crate::project::Project;

impl Project {
    /// Create a plain scene. `raw` selects the layer-less template;
    /// `with_init` adds an `Init.elm`.
    pub fn add_scene(
        &mut self,
        name: &str,
        raw: bool,
        with_init: bool,
    ) -> Result<(), ProjectError> {
        let scenes_dir = self.scenes_dir();
        std::fs::create_dir_all(&scenes_dir)
            .map_err(|e| ProjectError::io(&scenes_dir, e))?;
        if self.manifest().contains_name(name) {
            return Err(ProjectError::AlreadyExists {
                kind: EntityKind::Scene,
                name: name.to_string(),
            });
        }

        self.manifest_mut().scenes.insert(
            name.to_string(),
            Scene {
                raw,
                sceneproto: None,
            },
        );
        self.save_manifest()?;

        let scene_dir = scenes_dir.join(name);
        std::fs::create_dir_all(&scene_dir)
            .map_err(|e| ProjectError::io(&scene_dir, e))?;

        if with_init {
            TemplateBatch::new(
                vec![self.store().scene_init()],
                vec![scene_dir.join("Init.elm")],
            )?
            .var("namespace", "Scenes")
            .var("scene", name)
            .render()?;
        }
        if raw {
            TemplateBatch::new(
                vec![self.store().scene_model(true)],
                vec![scene_dir.join("Model.elm")],
            )?
            .var("scene", name)
            .render()?;
        } else {
            TemplateBatch::new(
                vec![self.store().scene_model(false), self.store().scene_base()],
                vec![scene_dir.join("Model.elm"), scene_dir.join("SceneBase.elm")],
            )?
            .var("scene", name)
            .render()?;
        }
        self.stage(&[scene_dir])
    }

    /// Create a sceneproto. Prototypes always get an `Init.elm`; their
    /// levels inherit `raw`.
    pub fn add_sceneproto(&mut self, name: &str, raw: bool) -> Result<(), ProjectError> {
        let protos_dir = self.sceneprotos_dir();
        std::fs::create_dir_all(&protos_dir)
            .map_err(|e| ProjectError::io(&protos_dir, e))?;
        if self.manifest().contains_name(name) {
            return Err(ProjectError::AlreadyExists {
                kind: EntityKind::SceneProto,
                name: name.to_string(),
            });
        }

        self.manifest_mut().sceneprotos.insert(
            name.to_string(),
            SceneProto {
                raw,
                levels: Vec::new(),
            },
        );
        self.save_manifest()?;

        let proto_dir = protos_dir.join(name);
        std::fs::create_dir_all(&proto_dir)
            .map_err(|e| ProjectError::io(&proto_dir, e))?;

        TemplateBatch::new(
            vec![self.store().scene_init()],
            vec![proto_dir.join("Init.elm")],
        )?
        .var("namespace", "SceneProtos")
        .var("scene", name)
        .render()?;
        if raw {
            TemplateBatch::new(
                vec![self.store().proto_model(true)],
                vec![proto_dir.join("Model.elm")],
            )?
            .var("scene", name)
            .render()?;
        } else {
            TemplateBatch::new(
                vec![self.store().proto_model(false), self.store().proto_base()],
                vec![proto_dir.join("Model.elm"), proto_dir.join("SceneBase.elm")],
            )?
            .var("scene", name)
            .render()?;
        }
        self.stage(&[proto_dir])
    }

    /// Instantiate a level from a sceneproto. `raw` is inherited from
    /// the prototype. The scenes-map registration and the prototype's
    /// levels append are two separately persisted writes, in that order.
    pub fn add_level(&mut self, name: &str, sceneproto: &str) -> Result<(), ProjectError> {
        let scenes_dir = self.scenes_dir();
        std::fs::create_dir_all(&scenes_dir)
            .map_err(|e| ProjectError::io(&scenes_dir, e))?;
        let raw = match self.manifest().sceneprotos.get(sceneproto) {
            Some(proto) => proto.raw,
            None => {
                return Err(ProjectError::NotFound {
                    kind: EntityKind::SceneProto,
                    name: sceneproto.to_string(),
                })
            }
        };
        if self.manifest().contains_name(name) {
            return Err(ProjectError::AlreadyExists {
                kind: EntityKind::Level,
                name: name.to_string(),
            });
        }

        self.manifest_mut().scenes.insert(
            name.to_string(),
            Scene {
                raw,
                sceneproto: Some(sceneproto.to_string()),
            },
        );
        self.save_manifest()?;

        let scene_dir = scenes_dir.join(name);
        std::fs::create_dir_all(&scene_dir)
            .map_err(|e| ProjectError::io(&scene_dir, e))?;

        if let Some(proto) = self.manifest_mut().sceneprotos.get_mut(sceneproto) {
            proto.levels.push(name.to_string());
        }
        self.save_manifest()?;

        TemplateBatch::new(
            vec![self.store().proto_level(raw)],
            vec![scene_dir.join("Model.elm")],
        )?
        .var("level", name)
        .var("sceneproto", sceneproto)
        .render()?;
        self.stage(&[scene_dir])
    }

    /// Rewrite `AllScenes.elm` from the scenes map. A no-op when the
    /// scenes directory does not exist yet.
    pub fn regenerate_scene_list(&self) -> Result<(), ProjectError> {
        let scenes_dir = self.scenes_dir();
        if !scenes_dir.is_dir() {
            return Ok(());
        }
        let names: Vec<&String> = self.manifest().scenes.keys().collect();
        let imports = names
            .iter()
            .map(|n| format!("import Scenes.{n}.Model as {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let entries = names
            .iter()
            .map(|n| format!("( \"{n}\", {n}.scene )"))
            .collect::<Vec<_>>()
            .join("\n        , ");

        let target = scenes_dir.join("AllScenes.elm");
        TemplateBatch::new(vec![self.store().scene_list()], vec![target.clone()])?
            .var("imports", imports)
            .var("scenes", entries)
            .render()?;
        self.stage(&[target])
    }
}
