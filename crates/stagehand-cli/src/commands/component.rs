//! Component command implementation.

use clap::Parser;
use stagehand_manifest::normalize;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Add a component to a scene or sceneproto
#[derive(Debug, Parser)]
pub struct ComponentCommand {
    /// Scene (or sceneproto, with --proto) the component belongs to
    pub scene: String,

    /// Component name
    pub name: String,

    /// Directory to store components
    #[arg(long = "cdir", default_value = "Components")]
    pub compdir: String,

    /// Create the component in a sceneproto
    #[arg(short = 'p', long = "proto")]
    pub proto: bool,

    /// Create an `Init.elm` file
    #[arg(short = 'i', long = "init")]
    pub with_init: bool,
}

impl ComponentCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let scene = normalize(&self.scene);
        let name = normalize(&self.name);
        let compdir = normalize(&self.compdir);
        let mut project = Project::open(".")?;

        confirm(
            &format!(
                "You are going to create a component named {name} in {}/{scene}/{compdir}, continue?",
                if self.proto { "SceneProtos" } else { "Scenes" }
            ),
            ctx.assume_yes,
        )?;
        project.ensure_clean_work_tree()?;

        project.add_component(&scene, &name, &compdir, self.with_init, self.proto)?;
        tools::format_sources(project.root())?;
        project.commit(&format!(
            "build(Stagehand): initialize component {name} in {} {scene}",
            if self.proto { "sceneproto" } else { "scene" }
        ))?;

        println!("Done!");
        Ok(())
    }
}
