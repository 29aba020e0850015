//! Input lines understood by the `todo` binary.

use crate::types::VisibilityFilter;
use std::str::FromStr;
use thiserror::Error;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <text>`
    Add(String),
    /// `toggle <id>`
    Toggle(u64),
    /// `filter <all|active|completed>`
    Filter(VisibilityFilter),
    /// `quit`
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Blank line
    #[error("empty command")]
    Empty,

    /// `add` without text
    #[error("`add` needs the todo text")]
    MissingText,

    /// `toggle` with a missing or non-numeric id
    #[error("`toggle` needs a numeric id, got `{0}`")]
    InvalidId(String),

    /// `filter` with anything but all/active/completed
    #[error("unknown filter `{0}` (expected all, active or completed)")]
    InvalidFilter(String),

    /// Unrecognized verb
    #[error("unknown command `{0}` (expected add, toggle, filter or quit)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb {
            "" => Err(CommandError::Empty),
            "add" if rest.is_empty() => Err(CommandError::MissingText),
            "add" => Ok(Self::Add(rest.to_string())),
            "toggle" => rest
                .parse()
                .map(Self::Toggle)
                .map_err(|_| CommandError::InvalidId(rest.to_string())),
            "filter" => match rest {
                "all" => Ok(Self::Filter(VisibilityFilter::ShowAll)),
                "active" => Ok(Self::Filter(VisibilityFilter::ShowActive)),
                "completed" => Ok(Self::Filter(VisibilityFilter::ShowCompleted)),
                other => Err(CommandError::InvalidFilter(other.to_string())),
            },
            "q" | "quit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_spaces_in_text() {
        assert_eq!(
            "add  buy oat milk ".parse::<Command>(),
            Ok(Command::Add("buy oat milk".to_string()))
        );
        assert_eq!("add".parse::<Command>(), Err(CommandError::MissingText));
    }

    #[test]
    fn parses_toggle() {
        assert_eq!("toggle 3".parse::<Command>(), Ok(Command::Toggle(3)));
        assert_eq!(
            "toggle three".parse::<Command>(),
            Err(CommandError::InvalidId("three".to_string()))
        );
        assert_eq!("toggle".parse::<Command>(), Err(CommandError::InvalidId(String::new())));
    }

    #[test]
    fn parses_filter() {
        assert_eq!(
            "filter completed".parse::<Command>(),
            Ok(Command::Filter(VisibilityFilter::ShowCompleted))
        );
        assert_eq!(
            "filter done".parse::<Command>(),
            Err(CommandError::InvalidFilter("done".to_string()))
        );
    }

    #[test]
    fn parses_quit_and_rejects_rest() {
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "remove 1".parse::<Command>(),
            Err(CommandError::Unknown("remove".to_string()))
        );
    }
}
