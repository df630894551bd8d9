//! Special commands parser for the interactive tutor
//!
//! Single-character commands navigate the history or end the session;
//! anything else is a question for the model. Commands are matched after
//! trimming and are case-sensitive, so `N` is a question, not `n`.

/// Special commands that can be executed during the interactive session
///
/// These commands act on the session history instead of being sent to
/// the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show the next (newer) history entry
    Next,

    /// Show the previous (older) history entry
    Previous,

    /// Show the most recent exchange again
    ShowLast,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Blank input; nothing to do
    Empty,

    /// Not a special command
    ///
    /// The input should be sent to the model as a new prompt.
    None,
}

/// Parse a user input line into a special command
///
/// # Command Examples
///
/// - `q`, `exit` or `quit` - Exit the session
/// - `n` - Show the next entry
/// - `p` - Show the previous entry
/// - `l` - Show the last exchange again
/// - `h` or `?` - Show help
///
/// # Examples
///
/// ```
/// use vimtutor::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("p"), SpecialCommand::Previous);
/// assert_eq!(parse_special_command(" q "), SpecialCommand::Exit);
/// assert_eq!(parse_special_command("how do I quit vim?"), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> SpecialCommand {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return SpecialCommand::Empty;
    }

    match trimmed {
        "q" | "exit" | "quit" => SpecialCommand::Exit,
        "n" => SpecialCommand::Next,
        "p" => SpecialCommand::Previous,
        "l" => SpecialCommand::ShowLast,
        "h" | "?" => SpecialCommand::Help,
        _ => SpecialCommand::None,
    }
}

/// Help text for the interactive session
pub fn help_text() -> &'static str {
    r#"
Commands
========

  <question>  - Ask the tutor (anything that is not a command below)
  p           - Show the previous answer
  n           - Show the next answer
  l           - Show the latest answer again
  h, ?        - Show this help
  q           - Quit (also: exit, quit, Ctrl-D)
"#
}
