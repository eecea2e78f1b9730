//! CLI argument definitions using clap derive macros.

use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{
    ComponentCommand, FontCommand, GlobalComponentCommand, InitCommand, LayerCommand,
    LevelCommand, RemoveCommand, SceneCommand, SyncCommand, UpdateCommand,
};
use crate::error::CliError;

/// Stagehand - scene scaffolding for the Stagehand framework
///
/// Create scenes, sceneprotos, levels, layers and components from the
/// versioned template store, and keep stagehand.json in step with the
/// generated sources.
#[derive(Debug, Parser)]
#[command(
    name = "stagehand",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new Stagehand project
    #[command(visible_alias = "new")]
    Init(InitCommand),

    /// Create a scene or sceneproto
    Scene(SceneCommand),

    /// Instantiate a level from a sceneproto
    Level(LevelCommand),

    /// Add a layer to a scene or sceneproto
    Layer(LayerCommand),

    /// Add a component to a scene or sceneproto
    Component(ComponentCommand),

    /// Add a global component
    #[command(name = "global-component", visible_alias = "gc")]
    GlobalComponent(GlobalComponentCommand),

    /// Remove a scene or sceneproto
    Remove(RemoveCommand),

    /// Rebuild the manifest's scene topology from the tree
    Sync(SyncCommand),

    /// Recover a manifest whose schema version diverged
    Update(UpdateCommand),

    /// Install fonts through the atlas packer
    Font(FontCommand),
}

/// Context passed to all commands
#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub assume_yes: bool,
}

impl Cli {
    /// Execute the selected command
    pub fn execute(self) -> Result<(), CliError> {
        let ctx = CommandContext {
            assume_yes: self.yes,
        };

        match self.command {
            Command::Init(cmd) => cmd.execute(&ctx),
            Command::Scene(cmd) => cmd.execute(&ctx),
            Command::Level(cmd) => cmd.execute(&ctx),
            Command::Layer(cmd) => cmd.execute(&ctx),
            Command::Component(cmd) => cmd.execute(&ctx),
            Command::GlobalComponent(cmd) => cmd.execute(&ctx),
            Command::Remove(cmd) => cmd.execute(&ctx),
            Command::Sync(cmd) => cmd.execute(&ctx),
            Command::Update(cmd) => cmd.execute(&ctx),
            Command::Font(cmd) => cmd.execute(&ctx),
        }
    }
}
