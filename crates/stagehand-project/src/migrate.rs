//! Schema recovery.
//!
//! The tool only accepts manifests whose recorded version equals
//! [`stagehand_manifest::SCHEMA_VERSION`]; there is no in-place upgrade.
//! The recovery path re-derives the manifest from the filesystem,
//! re-detects the template-repo reference from the `.stagehand`
//! checkout, and re-stamps the schema version. Every lookup degrades
//! gracefully: a warning, and the field is left blank.

use std::path::Path;

use stagehand_external::git;
use stagehand_manifest::{TemplateRepo, SCHEMA_VERSION};
use tracing::warn;

use crate::error::ProjectError;
use crate::project::Project;

impl Project {
    /// Run the full recovery: reconcile the scene topology, re-detect
    /// the template repo, re-stamp the version, and persist.
    pub fn recover(&mut self) -> Result<(), ProjectError> {
        self.manifest_mut().version = SCHEMA_VERSION.to_string();
        self.manifest_mut().template_repo = detect_template_repo(self.store().dir());

        let keep_auto_commit =
            self.manifest().auto_commit && git::is_work_tree(self.root());
        self.manifest_mut().auto_commit = keep_auto_commit;

        self.reconcile()?;
        self.save_manifest()
    }
}

/// Inspect the template checkout's git state to reconstruct the
/// template-repo reference.
fn detect_template_repo(store_dir: &Path) -> TemplateRepo {
    let mut repo = TemplateRepo::default();
    if !git::is_work_tree(store_dir) {
        warn!("no git repository in the template store; leaving template_repo blank");
        return repo;
    }

    match git::remote_url(store_dir) {
        Ok(url) => repo.url = url,
        Err(_) => {
            warn!("no origin remote on the template store; set template_repo.url manually");
        }
    }

    match git::exact_tag(store_dir) {
        Ok(tag) => repo.tag = tag,
        Err(_) => match git::upstream_branch(store_dir) {
            Ok(branch) => {
                // The default branch is recorded as blank so a plain
                // clone keeps tracking it.
                repo.tag = if branch == "origin/main" || branch == "origin/master" {
                    String::new()
                } else {
                    branch
                        .strip_prefix("origin/")
                        .unwrap_or(branch.as_str())
                        .to_string()
                };
            }
            Err(_) => {
                warn!("no tag or upstream branch on the template store; set template_repo.tag manually");
            }
        },
    }
    repo
}
