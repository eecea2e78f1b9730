//! Update command implementation.
//!
//! Recovery path for manifests whose schema version diverged from the
//! running tool: the manifest is re-derived from the filesystem and
//! re-stamped with the current schema version.

use clap::Parser;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Recover a manifest whose schema version diverged
#[derive(Debug, Parser)]
pub struct UpdateCommand {}

impl UpdateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut project = Project::open_lenient(".")?;

        confirm(
            "You are going to update stagehand.json according to your project, continue?",
            ctx.assume_yes,
        )?;

        project.recover()?;
        tools::format_sources(project.root())?;
        project.commit("build(Stagehand): update stagehand.json")?;

        println!("Done!");
        Ok(())
    }
}
