//! Command-line parsing for the text protocol.

/// One input line, split into the command word and its argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Option<String>),
    Undo,
    New,
    Ai(Option<String>),
    /// Everything after the command word, rejoined with single spaces
    Fen(Option<String>),
    Export,
    Eval,
    Perft(Option<String>),
    Divide(Option<String>),
    Status,
    Display,
    Help,
    Quit,
    Unknown(String),
}

/// `None` for a blank line. The command word is case-insensitive.
pub fn parse(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let word = parts.next()?.to_ascii_lowercase();
    let rest: Vec<&str> = parts.collect();
    let first = rest.first().map(|s| s.to_string());

    let command = match word.as_str() {
        "move" => Command::Move(first),
        "undo" => Command::Undo,
        "new" => Command::New,
        "ai" => Command::Ai(first),
        "fen" => Command::Fen(if rest.is_empty() { None } else { Some(rest.join(" ")) }),
        "export" => Command::Export,
        "eval" => Command::Eval,
        "perft" => Command::Perft(first),
        "divide" => Command::Divide(first),
        "status" => Command::Status,
        "display" | "d" => Command::Display,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(word),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_words() {
        assert_eq!(parse("   "), None);
        assert_eq!(parse("MOVE e2e4"), Some(Command::Move(Some("e2e4".into()))));
        assert_eq!(parse("move"), Some(Command::Move(None)));
        assert_eq!(parse("d"), Some(Command::Display));
        assert_eq!(parse("exit"), Some(Command::Quit));
        assert_eq!(parse("castle"), Some(Command::Unknown("castle".into())));
    }

    #[test]
    fn test_fen_keeps_all_fields() {
        assert_eq!(
            parse("fen  8/8/8/8/8/8/8/K6k   w - - 0 1"),
            Some(Command::Fen(Some("8/8/8/8/8/8/8/K6k w - - 0 1".into())))
        );
    }
}
