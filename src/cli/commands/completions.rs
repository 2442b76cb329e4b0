//! `key completions <SHELL>` — print a shell completion script.
//!
//! Usage:
//!   key completions bash > ~/.local/share/bash-completion/completions/key
//!   key completions zsh > "${fpath[1]}/_key"

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;

    fn parsed_shell(name: &str) -> Option<Shell> {
        match Cli::try_parse_from(["key", "completions", name]).ok()?.command {
            Commands::Completions { shell } => Some(shell),
            _ => None,
        }
    }

    #[test]
    fn known_shells_parse() {
        assert_eq!(parsed_shell("bash"), Some(Shell::Bash));
        assert_eq!(parsed_shell("zsh"), Some(Shell::Zsh));
        assert_eq!(parsed_shell("fish"), Some(Shell::Fish));
        assert_eq!(parsed_shell("powershell"), Some(Shell::PowerShell));
        assert_eq!(parsed_shell("elvish"), Some(Shell::Elvish));
    }

    #[test]
    fn unknown_shell_is_rejected() {
        assert_eq!(parsed_shell("csh"), None);
    }
}
