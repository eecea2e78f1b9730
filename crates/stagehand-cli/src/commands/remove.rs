//! Remove command implementation.

use clap::{Parser, ValueEnum};
use stagehand_manifest::normalize;
use stagehand_project::{Project, RemoveKind, RemoveOptions};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;

/// Entity kinds that can be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RemoveTarget {
    Scene,
    Sceneproto,
}

/// Remove a scene or sceneproto
#[derive(Debug, Parser)]
pub struct RemoveCommand {
    /// Entity kind to remove
    #[arg(value_enum)]
    pub kind: RemoveTarget,

    /// Entity name
    pub name: String,

    /// Also remove the generated modules from disk
    #[arg(long = "rm")]
    pub delete_files: bool,

    /// Remove all levels using the sceneproto
    #[arg(long = "rml")]
    pub remove_levels: bool,
}

impl RemoveCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let name = normalize(&self.name);
        let kind = match self.kind {
            RemoveTarget::Scene => RemoveKind::Scene,
            RemoveTarget::Sceneproto => RemoveKind::SceneProto,
        };
        let mut project = Project::open(".")?;

        confirm(
            &format!(
                "You are going to remove {name} ({}), continue?",
                match self.kind {
                    RemoveTarget::Scene => "scene",
                    RemoveTarget::Sceneproto => "sceneproto",
                }
            ),
            ctx.assume_yes,
        )?;

        project.remove(
            kind,
            &name,
            RemoveOptions {
                delete_files: self.delete_files,
                cascade_levels: self.remove_levels,
            },
        )?;

        println!("Done!");
        Ok(())
    }
}
