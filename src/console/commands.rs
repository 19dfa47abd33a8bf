//! Console command parsing
//!
//! Turns one input line into a [`Command`].

use serde_json::Value;

use crate::error::ConsoleError;

/// Maximum accepted note id length in bytes
pub const MAX_ID_LENGTH: usize = 256;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Get { id: String },
    Set { id: String, payload: Value },
    Remove { id: String },
    Clear,
    Stats,
    Help,
    Quit,
}

impl Command {
    /// Parses a single line of input.
    ///
    /// The payload of `set` is everything after the id and must be valid JSON.
    pub fn parse(line: &str) -> Result<Self, ConsoleError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "get" => Ok(Command::Get {
                id: parse_id("get", rest)?.to_string(),
            }),
            "set" => {
                let (id, payload) = match rest.split_once(char::is_whitespace) {
                    Some((id, payload)) => (id, payload.trim()),
                    None => (rest, ""),
                };
                let id = parse_id("set", id)?.to_string();
                if payload.is_empty() {
                    return Err(ConsoleError::MissingArgument {
                        command: "set",
                        argument: "payload",
                    });
                }
                let payload = serde_json::from_str(payload)
                    .map_err(|err| ConsoleError::InvalidPayload(err.to_string()))?;
                Ok(Command::Set { id, payload })
            }
            "del" | "delete" | "remove" => Ok(Command::Remove {
                id: parse_id("del", rest)?.to_string(),
            }),
            "clear" => Ok(Command::Clear),
            "stats" => Ok(Command::Stats),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(ConsoleError::UnknownCommand(name.to_string())),
        }
    }
}

/// Validates a note id argument: non-empty, a single token, bounded length.
fn parse_id<'a>(command: &'static str, raw: &'a str) -> Result<&'a str, ConsoleError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ConsoleError::MissingArgument {
            command,
            argument: "id",
        });
    }
    if id.contains(char::is_whitespace) {
        return Err(ConsoleError::InvalidPayload(format!(
            "unexpected input after id: {}",
            id
        )));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(ConsoleError::InvalidPayload(format!(
            "id exceeds maximum length of {} bytes",
            MAX_ID_LENGTH
        )));
    }
    Ok(id)
}
