//! Project state: the loaded manifest and the tree it describes.

use std::path::{Path, PathBuf};

use stagehand_external::git;
use stagehand_manifest::{Manifest, ManifestError, MANIFEST_FILE};
use stagehand_templates::{TemplateStore, STORE_DIR};
use tracing::{info, warn};

use crate::error::ProjectError;

/// Scenes directory, relative to the project root.
pub const SCENES_DIR: &str = "src/Scenes";
/// Sceneprotos directory, relative to the project root.
pub const SCENEPROTOS_DIR: &str = "src/SceneProtos";
/// Global components directory, relative to the project root.
pub const GLOBAL_COMPONENTS_DIR: &str = "src/GlobalComponents";

/// A Stagehand project: root directory, loaded manifest and template
/// store. Exactly one `Project` exists per invocation; every mutator
/// takes it by mutable reference.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    manifest: Manifest,
    store: TemplateStore,
}

impl Project {
    /// Open the project at `root` with the schema version gate, cloning
    /// the template store if the checkout is missing.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let root = root.as_ref().to_path_buf();
        let manifest = Manifest::load(&root)?;
        let store = TemplateStore::new(&root);
        let project = Self {
            root,
            manifest,
            store,
        };
        project.ensure_store()?;
        Ok(project)
    }

    /// Open the project leniently: the schema version gate is skipped
    /// and a missing manifest degrades to defaults. Only the `update`
    /// recovery path uses this.
    pub fn open_lenient(root: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let root = root.as_ref().to_path_buf();
        let manifest = match Manifest::load_unchecked(&root) {
            Ok(manifest) => manifest,
            Err(ManifestError::NotFound { path }) => {
                warn!(path = %path.display(), "manifest missing, starting from defaults");
                Manifest::default()
            }
            Err(err) => return Err(err.into()),
        };
        let store = TemplateStore::new(&root);
        let project = Self {
            root,
            manifest,
            store,
        };
        // Recovery must proceed even when the store cannot be fetched;
        // template-repo detection then degrades to blank fields.
        if let Err(err) = project.ensure_store() {
            warn!("could not fetch the template store: {err}");
        }
        Ok(project)
    }

    fn ensure_store(&self) -> Result<(), ProjectError> {
        if self.store.exists() {
            return Ok(());
        }
        let repo = &self.manifest.template_repo;
        if repo.url.is_empty() {
            return Err(ProjectError::TemplateStoreUnavailable);
        }
        info!(url = %repo.url, "template store not found, cloning");
        let reference = (!repo.tag.is_empty()).then_some(repo.tag.as_str());
        git::clone(&repo.url, reference, STORE_DIR, &self.root)?;
        Ok(())
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loaded manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Mutable access to the manifest. Callers persist with
    /// [`Project::save_manifest`] after each step.
    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    /// Template store of this project.
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Persist the manifest, staging it when auto-commit is on.
    pub fn save_manifest(&self) -> Result<(), ProjectError> {
        self.manifest.save(&self.root)?;
        self.stage(&[PathBuf::from(MANIFEST_FILE)])?;
        Ok(())
    }

    /// Refuse to proceed when auto-commit is on and the work tree is
    /// dirty.
    pub fn ensure_clean_work_tree(&self) -> Result<(), ProjectError> {
        if !self.manifest.auto_commit {
            return Ok(());
        }
        let status = git::status_porcelain(&self.root)?;
        if status.trim().is_empty() {
            Ok(())
        } else {
            Err(ProjectError::DirtyWorkTree { details: status })
        }
    }

    /// Stage paths for commit when auto-commit is on.
    pub fn stage<P: AsRef<Path>>(&self, paths: &[P]) -> Result<(), ProjectError> {
        if self.manifest.auto_commit {
            git::add(&self.root, paths)?;
        }
        Ok(())
    }

    /// Commit staged changes when auto-commit is on.
    pub fn commit(&self, message: &str) -> Result<(), ProjectError> {
        if self.manifest.auto_commit {
            git::commit(&self.root, message)?;
        }
        Ok(())
    }

    pub(crate) fn scenes_dir(&self) -> PathBuf {
        self.root.join(SCENES_DIR)
    }

    pub(crate) fn sceneprotos_dir(&self) -> PathBuf {
        self.root.join(SCENEPROTOS_DIR)
    }

    pub(crate) fn global_components_dir(&self) -> PathBuf {
        self.root.join(GLOBAL_COMPONENTS_DIR)
    }

    /// Directory of a scene or sceneproto entry.
    pub(crate) fn entity_dir(&self, name: &str, in_proto: bool) -> PathBuf {
        if in_proto {
            self.sceneprotos_dir().join(name)
        } else {
            self.scenes_dir().join(name)
        }
    }
}
