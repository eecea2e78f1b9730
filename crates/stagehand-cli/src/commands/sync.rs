//! Sync command implementation.

use clap::Parser;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;

/// Rebuild the manifest's scene topology from the tree
#[derive(Debug, Parser)]
pub struct SyncCommand {}

impl SyncCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut project = Project::open(".")?;

        confirm(
            "You are going to rebuild stagehand.json from the project tree, continue?",
            ctx.assume_yes,
        )?;

        project.reconcile()?;
        project.save_manifest()?;
        project.commit("build(Stagehand): sync stagehand.json")?;

        println!("Done!");
        Ok(())
    }
}
