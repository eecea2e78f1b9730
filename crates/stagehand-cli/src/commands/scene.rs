//! Scene command implementation.

use clap::Parser;
use stagehand_manifest::normalize;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Create a scene or sceneproto
#[derive(Debug, Parser)]
pub struct SceneCommand {
    /// Scene name
    pub name: String,

    /// Use a raw scene without layers
    #[arg(long)]
    pub raw: bool,

    /// Create a sceneproto instead of a scene
    #[arg(short = 'p', long = "proto")]
    pub proto: bool,

    /// Create an `Init.elm` file
    #[arg(short = 'i', long = "init")]
    pub with_init: bool,
}

impl SceneCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let name = normalize(&self.name);
        let kind = if self.proto { "sceneproto" } else { "scene" };
        let mut project = Project::open(".")?;

        confirm(
            &format!(
                "You are going to create a {}{kind} named {name}, continue?",
                if self.raw { "raw " } else { "" }
            ),
            ctx.assume_yes,
        )?;
        project.ensure_clean_work_tree()?;

        if self.proto {
            project.add_sceneproto(&name, self.raw)?;
        } else {
            project.add_scene(&name, self.raw, self.with_init)?;
        }
        project.regenerate_scene_list()?;
        tools::format_sources(project.root())?;
        project.commit(&format!("build(Stagehand): initialize {kind} {name}"))?;

        println!("Done!");
        Ok(())
    }
}
