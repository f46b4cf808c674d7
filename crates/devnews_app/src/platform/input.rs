use devnews_core::{find_topic, Topic};

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Topic(&'static Topic),
    Topics,
    Keyword(&'a str),
    Recent(bool),
    Search,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command<'_>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "search" | "s" => Ok(Command::Search),
        // An empty argument selects "All Tech".
        "topic" | "t" => find_topic(rest)
            .map(Command::Topic)
            .ok_or_else(|| format!("Unknown topic {rest:?}. Type `topics` to list them.")),
        "topics" => Ok(Command::Topics),
        "keyword" | "k" => Ok(Command::Keyword(rest)),
        "recent" | "r" => match rest.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Ok(Command::Recent(true)),
            "off" | "no" | "false" => Ok(Command::Recent(false)),
            _ => Err("Usage: recent on|off".to_string()),
        },
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(format!("Unknown command {word:?}. Type `help` for the list.")),
    }
}
