//! Level command implementation.

use clap::Parser;
use stagehand_manifest::normalize;
use stagehand_project::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::prompts::confirm;
use crate::tools;

/// Instantiate a level from a sceneproto
#[derive(Debug, Parser)]
pub struct LevelCommand {
    /// Sceneproto to instantiate
    pub sceneproto: String,

    /// Level name
    pub name: String,
}

impl LevelCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let name = normalize(&self.name);
        let sceneproto = normalize(&self.sceneproto);
        let mut project = Project::open(".")?;

        confirm(
            &format!(
                "You are going to create a level named {name} from sceneproto {sceneproto}, continue?"
            ),
            ctx.assume_yes,
        )?;
        project.ensure_clean_work_tree()?;

        project.add_level(&name, &sceneproto)?;
        project.regenerate_scene_list()?;
        tools::format_sources(project.root())?;
        project.commit(&format!(
            "build(Stagehand): initialize level {name} from sceneproto {sceneproto}"
        ))?;

        println!("Done!");
        Ok(())
    }
}
