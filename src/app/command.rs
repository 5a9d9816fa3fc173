//! Ex command parsing

use std::path::PathBuf;

use super::format::FormatAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing typed
    Empty,
    Quit { force: bool },
    /// Write to the current file, prompting if there is none
    Write,
    WriteAs(PathBuf),
    WriteQuit,
    /// Open through the file prompt
    Edit,
    EditPath(PathBuf),
    SetLineNumbers(bool),
    Preview(bool),
    Format(FormatAction),
    Unknown(String),
}

/// Parses a command line without the leading ':'
pub fn parse_command(cmd_str: &str) -> Command {
    let trimmed = cmd_str.trim();
    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (trimmed, None),
    };

    match (name, arg) {
        ("", _) => Command::Empty,
        ("q" | "quit", None) => Command::Quit { force: false },
        ("q!" | "quit!", None) => Command::Quit { force: true },
        ("w" | "write", None) => Command::Write,
        ("w" | "write", Some(path)) => Command::WriteAs(PathBuf::from(path)),
        ("wq" | "x", None) => Command::WriteQuit,
        ("e" | "edit", None) => Command::Edit,
        ("e" | "edit", Some(path)) => Command::EditPath(PathBuf::from(path)),
        ("set" | "se", Some(option)) => parse_set(option).unwrap_or_else(|| Command::Unknown(trimmed.into())),
        ("preview", None) => Command::Preview(true),
        ("raw", None) => Command::Preview(false),
        (name, None) => match FormatAction::from_command(name) {
            Some(action) => Command::Format(action),
            None => Command::Unknown(trimmed.into()),
        },
        _ => Command::Unknown(trimmed.into()),
    }
}

fn parse_set(option: &str) -> Option<Command> {
    match option {
        "nu" | "number" => Some(Command::SetLineNumbers(true)),
        "nonu" | "nonumber" => Some(Command::SetLineNumbers(false)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_command("q"), Command::Quit { force: false });
        assert_eq!(parse_command("q!"), Command::Quit { force: true });
        assert_eq!(parse_command(" quit "), Command::Quit { force: false });
    }

    #[test]
    fn test_parse_write() {
        assert_eq!(parse_command("w"), Command::Write);
        assert_eq!(parse_command("wq"), Command::WriteQuit);
        assert_eq!(parse_command("x"), Command::WriteQuit);
    }

    #[test]
    fn test_parse_write_as() {
        assert_eq!(parse_command("w  notes/today.md "), Command::WriteAs("notes/today.md".into()));
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(parse_command("e"), Command::Edit);
        assert_eq!(parse_command("edit ~/a.md"), Command::EditPath("~/a.md".into()));
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(parse_command("set nu"), Command::SetLineNumbers(true));
        assert_eq!(parse_command("set nonumber"), Command::SetLineNumbers(false));
        assert_eq!(parse_command("set wrap"), Command::Unknown("set wrap".into()));
    }

    #[test]
    fn test_parse_display_and_format() {
        assert_eq!(parse_command("preview"), Command::Preview(true));
        assert_eq!(parse_command("raw"), Command::Preview(false));
        assert_eq!(parse_command("bold"), Command::Format(FormatAction::Bold));
        assert_eq!(parse_command("h2"), Command::Format(FormatAction::Heading2));
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("unknown"), Command::Unknown("unknown".into()));
        assert_eq!(parse_command("q now"), Command::Unknown("q now".into()));
    }
}
