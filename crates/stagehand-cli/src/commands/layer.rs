//! Layer command implementation.

use clap::Parser;
use stagehand_manifest::normalize;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Add a layer to a scene or sceneproto
#[derive(Debug, Parser)]
pub struct LayerCommand {
    /// Scene (or sceneproto, with --proto) the layer belongs to
    pub scene: String,

    /// Layer name
    pub layer: String,

    /// Use components in this layer
    #[arg(short = 'c', long = "with-component")]
    pub with_component: bool,

    /// Directory of components in the scene
    #[arg(long = "cdir", default_value = "Components")]
    pub compdir: String,

    /// Create the layer in a sceneproto
    #[arg(short = 'p', long = "proto")]
    pub proto: bool,

    /// Create an `Init.elm` file
    #[arg(short = 'i', long = "init")]
    pub with_init: bool,
}

impl LayerCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let scene = normalize(&self.scene);
        let layer = normalize(&self.layer);
        let compdir = normalize(&self.compdir);
        let mut project = Project::open(".")?;

        confirm(
            &format!(
                "You are going to create a layer named {layer} under {} {scene}, continue?",
                if self.proto { "sceneproto" } else { "scene" }
            ),
            ctx.assume_yes,
        )?;
        project.ensure_clean_work_tree()?;

        project.add_layer(
            &scene,
            &layer,
            self.with_component,
            &compdir,
            self.with_init,
            self.proto,
        )?;
        tools::format_sources(project.root())?;
        project.commit(&format!(
            "build(Stagehand): initialize layer {layer} under {} {scene}",
            if self.proto { "sceneproto" } else { "scene" }
        ))?;

        println!("Done!");
        Ok(())
    }
}
