//! Formatter and tool-availability glue.

use std::path::Path;

use stagehand_external::process;

use crate::error::CliError;

/// Verify that an external tool can be launched and exits cleanly.
pub fn require(program: &str, args: &[&str]) -> Result<(), CliError> {
    process::run_checked(program, args, None)?;
    Ok(())
}

/// Format the generated sources in place.
pub fn format_sources(root: &Path) -> Result<(), CliError> {
    process::run_checked("elm-format", &["src/", "--yes"], Some(root))?;
    Ok(())
}
