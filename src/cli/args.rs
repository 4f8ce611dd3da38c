//! Command-line argument parsing for the mypets CLI.

use thiserror::Error;

use crate::models::{Gender, ThemeMode};
use crate::view_model::{AddPetForm, PetFilter};

/// What to do with the theme preference.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeCommand {
    /// Print mode and resolved scheme
    Show,
    Set(ThemeMode),
    Toggle,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// List pets (default)
    List {
        filter: PetFilter,
        /// Ids to mark as favorite before listing
        favorites: Vec<String>,
    },
    /// Show one pet's profile
    Show { id: String },
    /// Create a pet
    Add(AddPetForm),
    /// Change a pet's name
    Rename { id: String, name: String },
    /// Inspect or change the theme
    Theme(ThemeCommand),
}

/// Argument errors, shown together with the usage text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("{0}")]
    InvalidValue(String),
}

pub const USAGE: &str = "\
Usage: mypets [COMMAND]

Commands:
  list [--search <text>] [--type <type>] [--favorite <id>]... [--favorites-only]
  show <id>
  add --name <name> --type <type> --weight <kg> [--breed <breed>]
      [--gender male|female] [--birthdate <YYYY-MM-DD>]
  rename <id> <name>
  theme [light|dark|system|toggle]

Options:
  -V, --version    Print version
  -h, --help       Print this help

Environment:
  MYPETS_API_URL   Pets collection URL
  MYPETS_DATA_DIR  Directory for saved preferences (default ~/.mypets)
  MYPETS_LOG       Log filter, e.g. mypets=debug (default warn)";

/// Parse command-line arguments and return the appropriate command.
///
/// The first item is the program name and is skipped. With no command the
/// pet list is shown.
///
/// # Examples
///
/// ```
/// use mypets::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["mypets".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);

    let command = match args.next() {
        Some(command) => command,
        None => {
            return Ok(CliCommand::List {
                filter: PetFilter::default(),
                favorites: Vec::new(),
            })
        }
    };

    match command.as_str() {
        "--version" | "-V" => Ok(CliCommand::Version),
        "--help" | "-h" | "help" => Ok(CliCommand::Help),
        "list" => parse_list(args),
        "show" => {
            let id = args.next().ok_or(ArgsError::MissingArgument("id"))?;
            no_more(args)?;
            Ok(CliCommand::Show { id })
        }
        "add" => parse_add(args),
        "rename" => {
            let id = args.next().ok_or(ArgsError::MissingArgument("id"))?;
            let name = args.next().ok_or(ArgsError::MissingArgument("name"))?;
            no_more(args)?;
            Ok(CliCommand::Rename { id, name })
        }
        "theme" => {
            let theme = match args.next().as_deref() {
                None => ThemeCommand::Show,
                Some("toggle") => ThemeCommand::Toggle,
                Some(mode) => ThemeCommand::Set(
                    mode.parse::<ThemeMode>()
                        .map_err(|e| ArgsError::InvalidValue(e.to_string()))?,
                ),
            };
            no_more(args)?;
            Ok(CliCommand::Theme(theme))
        }
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn parse_list(mut args: impl Iterator<Item = String>) -> Result<CliCommand, ArgsError> {
    let mut filter = PetFilter::default();
    let mut favorites = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--search" => filter.query = value_for(&arg, &mut args)?,
            "--type" => filter.kind = Some(value_for(&arg, &mut args)?),
            "--favorite" => favorites.push(value_for(&arg, &mut args)?),
            "--favorites-only" => filter.favorites_only = true,
            _ => return Err(ArgsError::UnexpectedArgument(arg)),
        }
    }

    Ok(CliCommand::List { filter, favorites })
}

fn parse_add(mut args: impl Iterator<Item = String>) -> Result<CliCommand, ArgsError> {
    let mut form = AddPetForm::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--name" => form.name = value_for(&arg, &mut args)?,
            "--type" => form.kind = value_for(&arg, &mut args)?,
            "--breed" => form.breed = value_for(&arg, &mut args)?,
            "--weight" => form.weight = value_for(&arg, &mut args)?,
            "--birthdate" => form.birthdate = value_for(&arg, &mut args)?,
            "--gender" => {
                form.gender = value_for(&arg, &mut args)?
                    .parse::<Gender>()
                    .map_err(|e| ArgsError::InvalidValue(e.to_string()))?
            }
            _ => return Err(ArgsError::UnexpectedArgument(arg)),
        }
    }

    Ok(CliCommand::Add(form))
}

fn value_for(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn no_more(mut args: impl Iterator<Item = String>) -> Result<(), ArgsError> {
    match args.next() {
        Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
        None => Ok(()),
    }
}
