//! REPL input parsing.

use std::path::PathBuf;
use tolk_core::translation::{Language, LanguagePair};

/// Slash commands offered for completion, in display order.
pub const COMMANDS: &[&str] = &[
    "/translate",
    "/multi",
    "/detect",
    "/doc",
    "/history",
    "/messages",
    "/clear",
    "/help",
];

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: translated through the chat log
    Chat(String),
    Translate(String),
    Multi { pair: LanguagePair, text: String },
    Detect(String),
    Document {
        path: PathBuf,
        pair: Option<LanguagePair>,
    },
    History,
    Messages,
    Clear,
    Help,
    Quit,
}

/// Parses a trimmed, non-empty input line.
///
/// Returns a usage message when a slash command is malformed.
pub fn parse(line: &str) -> Result<Command, String> {
    if line == "quit" || line == "exit" {
        return Ok(Command::Quit);
    }
    if !line.starts_with('/') {
        return Ok(Command::Chat(line.to_string()));
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "/translate" => Ok(Command::Translate(rest.to_string())),
        "/detect" => Ok(Command::Detect(rest.to_string())),
        "/multi" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let (Some(from), Some(to)) = (parts.next(), parts.next()) else {
                return Err("Usage: /multi <from> <to> <text>".to_string());
            };
            let pair = parse_pair(from, to)?;
            let text = parts.next().unwrap_or("").trim().to_string();
            Ok(Command::Multi { pair, text })
        }
        "/doc" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match parts.as_slice() {
                [path] => Ok(Command::Document {
                    path: PathBuf::from(path),
                    pair: None,
                }),
                [path, from, to] => Ok(Command::Document {
                    path: PathBuf::from(path),
                    pair: Some(parse_pair(from, to)?),
                }),
                _ => Err("Usage: /doc <path> [<from> <to>]".to_string()),
            }
        }
        "/history" => Ok(Command::History),
        "/messages" => Ok(Command::Messages),
        "/clear" => Ok(Command::Clear),
        "/help" => Ok(Command::Help),
        other => Err(format!("Unknown command: {other} (try /help)")),
    }
}

fn parse_pair(from: &str, to: &str) -> Result<LanguagePair, String> {
    let source = Language::parse(from).map_err(|e| e.to_string())?;
    let target = Language::parse(to).map_err(|e| e.to_string())?;
    Ok(LanguagePair::new(source, target))
}
