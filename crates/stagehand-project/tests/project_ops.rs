//! End-to-end project operation tests over a synthetic template store.

use std::fs;
use std::path::{Path, PathBuf};

use stagehand_manifest::Manifest;
use stagehand_project::{Project, ProjectError, RemoveKind, RemoveOptions};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project root with a manifest and a local template checkout laid
/// out the way the real template repository is.
fn project_fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    let store = root.join(".stagehand");

    write(
        &store.join("scene/Init.elm"),
        "module {{ namespace }}.{{ scene }}.Init exposing (initData)\n",
    );
    write(
        &store.join("scene/Raw/Model.elm"),
        "module Scenes.{{ scene }}.Model exposing (scene)\n\n\
         import Stagehand.Scene.RawScene exposing (genRawScene)\n",
    );
    write(
        &store.join("scene/Layered/Model.elm"),
        "module Scenes.{{ scene }}.Model exposing (scene)\n\n\
         import Stagehand.Scene.LayeredScene exposing (genLayeredScene)\n",
    );
    write(
        &store.join("scene/SceneBase.elm"),
        "module Scenes.{{ scene }}.SceneBase exposing (SceneCommonData)\n",
    );
    write(
        &store.join("scene/AllScenes.elm"),
        "module Scenes.AllScenes exposing (allScenes)\n\n{{ imports }}\n\n\
         allScenes =\n    [ {{ scenes }}\n    ]\n",
    );
    write(
        &store.join("sceneproto/Raw/Model.elm"),
        "module SceneProtos.{{ scene }}.Model exposing (genScene)\n\n\
         import Stagehand.Scene.RawScene exposing (genRawScene)\n",
    );
    write(
        &store.join("sceneproto/Layered/Model.elm"),
        "module SceneProtos.{{ scene }}.Model exposing (genScene)\n",
    );
    write(
        &store.join("sceneproto/SceneBase.elm"),
        "module SceneProtos.{{ scene }}.SceneBase exposing (SceneCommonData)\n",
    );
    write(
        &store.join("sceneproto/Raw/Level.elm"),
        "module Scenes.{{ level }}.Model exposing (scene)\n\n\
         import SceneProtos.{{ sceneproto }}.Model exposing (genScene)\n\
         import Stagehand.Scene.LevelInit exposing (LevelInit)\n\
         import Stagehand.Scene.RawScene exposing (genRawScene)\n",
    );
    write(
        &store.join("sceneproto/Layered/Level.elm"),
        "module Scenes.{{ level }}.Model exposing (scene)\n\n\
         import SceneProtos.{{ sceneproto }}.Model exposing (genScene)\n\
         import Stagehand.Scene.LevelInit exposing (LevelInit)\n",
    );
    write(
        &store.join("component/ComponentBase.elm"),
        "module {{ namespace }}.{{ scene }}.{{ dir }}.ComponentBase exposing (BaseData)\n",
    );
    write(
        &store.join("component/UserComponent/Model.elm"),
        "module {{ namespace }}.{{ scene }}.{{ dir }}.{{ name }}.Model exposing (component)\n",
    );
    write(
        &store.join("component/Init.elm"),
        "module {{ namespace }}.{{ scene }}.{{ dir }}.{{ name }}.Init exposing (initData)\n",
    );
    write(
        &store.join("component/GlobalComponent/Model.elm"),
        "module GlobalComponents.{{ name }}.Model exposing (genGC)\n",
    );
    write(
        &store.join("layer/Model.elm"),
        "module {{ namespace }}.{{ scene }}.{{ layer }}.Model exposing (layer)\n",
    );
    write(
        &store.join("layer/ModelC.elm"),
        "module {{ namespace }}.{{ scene }}.{{ layer }}.Model exposing (layer)\n\n\
         import {{ namespace }}.{{ scene }}.{{ dir }}.ComponentBase exposing (BaseData)\n",
    );
    write(
        &store.join("layer/Init.elm"),
        "module {{ namespace }}.{{ scene }}.{{ layer }}.Init exposing (initData)\n",
    );

    Manifest::default().save(&root).unwrap();
    (dir, root)
}

fn manifest_bytes(root: &Path) -> Vec<u8> {
    fs::read(Manifest::path_in(root)).unwrap()
}

#[test]
fn test_proto_then_level_then_reconcile_scenario() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", false).unwrap();
    project.add_level("Boss1", "Boss").unwrap();

    project.reconcile().unwrap();
    project.save_manifest().unwrap();

    let manifest = Manifest::load(&root).unwrap();
    assert_eq!(manifest.sceneprotos["Boss"].levels, vec!["Boss1"]);
    assert_eq!(
        manifest.scenes["Boss1"].sceneproto.as_deref(),
        Some("Boss")
    );
    assert!(!manifest.scenes["Boss1"].raw);
}

#[test]
fn test_reconcile_is_idempotent() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", true).unwrap();
    project.add_level("Boss1", "Boss").unwrap();
    project.add_scene("Home", false, true).unwrap();

    project.reconcile().unwrap();
    project.save_manifest().unwrap();
    let first = manifest_bytes(&root);

    project.reconcile().unwrap();
    project.save_manifest().unwrap();
    let second = manifest_bytes(&root);

    assert_eq!(first, second);
}

#[test]
fn test_raw_flag_round_trips_through_reconcile() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", true).unwrap();
    project.add_level("Boss1", "Boss").unwrap();

    let before = project.manifest().clone();
    project.reconcile().unwrap();
    assert_eq!(project.manifest().scenes, before.scenes);
    assert_eq!(project.manifest().sceneprotos, before.sceneprotos);
    assert!(project.manifest().scenes["Boss1"].raw);
}

#[test]
fn test_remove_proto_with_levels_is_refused() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", false).unwrap();
    project.add_level("Boss1", "Boss").unwrap();
    let before = manifest_bytes(&root);

    let err = project
        .remove(RemoveKind::SceneProto, "Boss", RemoveOptions::default())
        .unwrap_err();
    match err {
        ProjectError::DependentLevels { name, count } => {
            assert_eq!(name, "Boss");
            assert_eq!(count, 1);
        }
        other => panic!("expected DependentLevels, got {other:?}"),
    }
    // Manifest untouched, both on disk and in memory.
    assert_eq!(manifest_bytes(&root), before);
    assert_eq!(project.manifest().sceneprotos["Boss"].levels, vec!["Boss1"]);
}

#[test]
fn test_double_add_scene_is_refused_and_state_kept() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_scene("Foo", false, false).unwrap();
    let before = manifest_bytes(&root);

    let err = project.add_scene("Foo", false, false).unwrap_err();
    assert!(matches!(err, ProjectError::AlreadyExists { .. }));
    assert_eq!(manifest_bytes(&root), before);
}

#[test]
fn test_names_collide_across_namespaces() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", false).unwrap();
    assert!(matches!(
        project.add_scene("Boss", false, false),
        Err(ProjectError::AlreadyExists { .. })
    ));

    project.add_scene("Home", false, false).unwrap();
    assert!(matches!(
        project.add_sceneproto("Home", false),
        Err(ProjectError::AlreadyExists { .. })
    ));
}

#[test]
fn test_add_level_requires_existing_proto() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    assert!(matches!(
        project.add_level("Boss1", "Boss"),
        Err(ProjectError::NotFound { .. })
    ));
}

#[test]
fn test_remove_scene_detaches_level_and_deletes_files() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", false).unwrap();
    project.add_level("Boss1", "Boss").unwrap();
    project.regenerate_scene_list().unwrap();
    let level_dir = root.join("src/Scenes/Boss1");
    assert!(level_dir.is_dir());

    project
        .remove(
            RemoveKind::Scene,
            "Boss1",
            RemoveOptions {
                delete_files: true,
                cascade_levels: false,
            },
        )
        .unwrap();

    let manifest = Manifest::load(&root).unwrap();
    assert!(manifest.scenes.is_empty());
    assert!(manifest.sceneprotos["Boss"].levels.is_empty());
    assert!(!level_dir.exists());

    let all_scenes = fs::read_to_string(root.join("src/Scenes/AllScenes.elm")).unwrap();
    assert!(!all_scenes.contains("Boss1"));
}

#[test]
fn test_cascade_remove_drops_all_levels() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", false).unwrap();
    project.add_level("Boss1", "Boss").unwrap();
    project.add_level("Boss2", "Boss").unwrap();

    project
        .remove(
            RemoveKind::SceneProto,
            "Boss",
            RemoveOptions {
                delete_files: true,
                cascade_levels: true,
            },
        )
        .unwrap();

    let manifest = Manifest::load(&root).unwrap();
    assert!(manifest.scenes.is_empty());
    assert!(manifest.sceneprotos.is_empty());
    assert!(!root.join("src/Scenes/Boss1").exists());
    assert!(!root.join("src/Scenes/Boss2").exists());
    assert!(!root.join("src/SceneProtos/Boss").exists());
}

#[test]
fn test_component_bases_materialize_once() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_scene("Game", false, false).unwrap();
    project
        .add_component("Game", "Enemy", "Components", true, false)
        .unwrap();

    let base = root.join("src/Scenes/Game/Components/ComponentBase.elm");
    assert!(base.is_file());
    let base_before = fs::read_to_string(&base).unwrap();
    assert_eq!(
        fs::read_to_string(root.join("src/Scenes/Game/Components/Enemy/Model.elm")).unwrap(),
        "module Scenes.Game.Components.Enemy.Model exposing (component)\n"
    );
    assert!(root
        .join("src/Scenes/Game/Components/Enemy/Init.elm")
        .is_file());

    project
        .add_component("Game", "Bullet", "Components", false, false)
        .unwrap();
    assert_eq!(fs::read_to_string(&base).unwrap(), base_before);

    assert!(matches!(
        project.add_component("Game", "Enemy", "Components", false, false),
        Err(ProjectError::AlreadyExists { .. })
    ));
}

#[test]
fn test_layer_in_proto_renders_component_aware_model() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_sceneproto("Boss", false).unwrap();
    project
        .add_layer("Boss", "Enemies", true, "Components", true, true)
        .unwrap();

    let layer_dir = root.join("src/SceneProtos/Boss/Enemies");
    let model = fs::read_to_string(layer_dir.join("Model.elm")).unwrap();
    assert!(model.contains("SceneProtos.Boss.Enemies.Model"));
    assert!(model.contains("SceneProtos.Boss.Components.ComponentBase"));
    assert!(layer_dir.join("Init.elm").is_file());
    assert!(root
        .join("src/SceneProtos/Boss/Components/ComponentBase.elm")
        .is_file());

    assert!(matches!(
        project.add_layer("Boss", "Enemies", false, "Components", false, true),
        Err(ProjectError::AlreadyExists { .. })
    ));
}

#[test]
fn test_global_component_keyed_on_generated_file() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_global_component("Sound").unwrap();
    assert!(root
        .join("src/GlobalComponents/Sound/Model.elm")
        .is_file());
    assert!(matches!(
        project.add_global_component("Sound"),
        Err(ProjectError::AlreadyExists { .. })
    ));
}

#[test]
fn test_reconcile_tolerates_unparsable_back_reference() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    // A hand-edited level whose prototype import no longer parses, a
    // directory without a model file, and a plain scene.
    write(
        &root.join("src/Scenes/Broken/Model.elm"),
        "module Scenes.Broken.Model exposing (scene)\n\nlevelInitData : LevelInit\n",
    );
    fs::create_dir_all(root.join("src/Scenes/NotAScene")).unwrap();
    write(
        &root.join("src/Scenes/Home/Model.elm"),
        "module Scenes.Home.Model exposing (scene)\n",
    );

    project.reconcile().unwrap();

    let manifest = project.manifest();
    assert_eq!(manifest.scenes.len(), 2);
    assert!(manifest.scenes["Broken"].sceneproto.is_none());
    assert!(manifest.scenes.contains_key("Home"));
    assert!(!manifest.scenes.contains_key("NotAScene"));
}

#[test]
fn test_recover_restamps_diverged_schema_version() {
    let (_dir, root) = project_fixture();

    let mut stale = Manifest::default();
    stale.version = "0.5.0".to_string();
    stale.auto_commit = true;
    stale.save(&root).unwrap();

    assert!(Project::open(&root).is_err());

    let mut project = Project::open_lenient(&root).unwrap();
    project.recover().unwrap();

    let manifest = Manifest::load(&root).unwrap();
    assert_eq!(manifest.version, stagehand_manifest::SCHEMA_VERSION);
    // The temp dir is not a git work tree, so both the template repo
    // and the auto-commit flag degrade to blank/off.
    assert!(manifest.template_repo.url.is_empty());
    assert!(!manifest.auto_commit);
}

#[test]
fn test_scene_list_contents() {
    let (_dir, root) = project_fixture();
    let mut project = Project::open(&root).unwrap();

    project.add_scene("Home", false, false).unwrap();
    project.add_scene("About", true, false).unwrap();
    project.regenerate_scene_list().unwrap();

    let all_scenes = fs::read_to_string(root.join("src/Scenes/AllScenes.elm")).unwrap();
    assert!(all_scenes.contains("import Scenes.About.Model as About"));
    assert!(all_scenes.contains("import Scenes.Home.Model as Home"));
    assert!(all_scenes.contains("( \"About\", About.scene )"));
    assert!(all_scenes.contains("( \"Home\", Home.scene )"));
}
