//! External process collaborators.
//!
//! Stagehand delegates version control, source formatting and font-atlas
//! packing to external executables. They are opaque here: arguments go
//! in, exit status and captured output come out. Nothing of their
//! internals is modeled.

pub mod git;
pub mod process;

pub use process::{run, run_checked, ExternalError, ToolOutput};
