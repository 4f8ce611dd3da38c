//! CLI module for mypets.
//!
//! This module provides the command-line front end:
//! - Argument parsing
//! - Version and help display
//! - Command execution against the pet service and local state
//!
//! # Usage
//!
//! ```ignore
//! use mypets::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! if let Some(result) = run_cli_command(&command) {
//!     return result;
//! }
//! // Build a `CliContext` and call `execute`
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, ThemeCommand, USAGE};
pub use commands::{execute, CliContext};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

/// Run a CLI command that needs neither the network nor local state.
///
/// # Returns
///
/// * `None` - The command needs a [`CliContext`]; pass it to [`execute`]
/// * `Some(Ok(()))` - The command was handled here
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            handle_version_command();
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_commands_return_none() {
        let result = run_cli_command(&CliCommand::Show {
            id: "1".to_string(),
        });
        assert!(result.is_none());
    }

    #[test]
    fn test_version_is_handled() {
        assert!(matches!(run_cli_command(&CliCommand::Version), Some(Ok(()))));
    }
}
