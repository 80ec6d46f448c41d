use crate::language::Language;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Lang(Language),
    Open,
    Clear,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.strip_prefix(':').unwrap_or(input).trim();

    if input.is_empty() {
        return None;
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    match cmd {
        // An empty query is legal; the API answers it with "not found".
        "search" | "s" => Some(Command::Search(args.to_owned())),
        // Unknown labels select the fallback entry, mirroring `language::resolve`.
        "lang" | "l" if !args.is_empty() => {
            Some(Command::Lang(Language::from_label(args).unwrap_or_default()))
        }
        "open" | "o" => Some(Command::Open),
        "clear" => Some(Command::Clear),
        "help" | "h" => Some(Command::Help),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}
