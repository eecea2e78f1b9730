//! Interactive confirmation prompts.
//!
//! Every mutating command passes through [`confirm`] before touching the
//! manifest or the tree. `--yes` skips the gate; a non-interactive
//! stdin without `--yes` is an error rather than a hang.

use std::io::{self, IsTerminal, Write};

use console::style;

use crate::error::CliError;

/// Ask the operator to confirm. Returns `Cancelled` on anything but an
/// explicit yes.
pub fn confirm(message: &str, assume_yes: bool) -> Result<(), CliError> {
    if assume_yes {
        return Ok(());
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::user_with_hint(
            "confirmation required but stdin is not a terminal",
            "re-run with --yes to skip the prompt",
        ));
    }

    print!("{} {} ", style(message).bold(), style("[y/N]").dim());
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => Err(CliError::Cancelled),
    }
}
