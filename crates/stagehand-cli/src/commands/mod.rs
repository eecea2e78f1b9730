//! Subcommand implementations.

mod component;
mod font;
mod global_component;
mod init;
mod layer;
mod level;
mod remove;
mod scene;
mod sync;
mod update;

pub use component::ComponentCommand;
pub use font::FontCommand;
pub use global_component::GlobalComponentCommand;
pub use init::InitCommand;
pub use layer::LayerCommand;
pub use level::LevelCommand;
pub use remove::RemoveCommand;
pub use scene::SceneCommand;
pub use sync::SyncCommand;
pub use update::UpdateCommand;
