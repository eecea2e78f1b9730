//! Global component command implementation.

use clap::Parser;
use stagehand_manifest::normalize;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Add a global component
#[derive(Debug, Parser)]
pub struct GlobalComponentCommand {
    /// Global component name
    pub name: String,
}

impl GlobalComponentCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let name = normalize(&self.name);
        let mut project = Project::open(".")?;

        confirm(
            &format!("You are going to create a global component named {name}, continue?"),
            ctx.assume_yes,
        )?;
        project.ensure_clean_work_tree()?;

        project.add_global_component(&name)?;
        tools::format_sources(project.root())?;
        project.commit(&format!(
            "build(Stagehand): initialize global component {name}"
        ))?;

        println!("Done!");
        Ok(())
    }
}
