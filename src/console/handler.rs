//! Console command handler
//!
//! Applies a parsed [`Command`] to a note cache and builds the reply.

use serde_json::Value;

use crate::cache::{Clock, NoteCacheManager};
use crate::console::responses::{
    GetResponse, MessageResponse, RemoveResponse, Reply, SetResponse, StatsResponse,
};
use crate::console::Command;

const HELP: &str = "commands: get <id> | set <id> <json> | del <id> | clear | stats | help | quit";

/// Executes `command` against `cache`.
pub fn handle<C: Clock>(cache: &NoteCacheManager<Value, C>, command: Command) -> Reply {
    match command {
        Command::Get { id } => {
            let note = cache.get(&id);
            Reply::Get(GetResponse::new(id, note))
        }
        Command::Set { id, payload } => {
            cache.set(id.as_str(), payload);
            Reply::Set(SetResponse::new(id))
        }
        Command::Remove { id } => {
            let removed = cache.remove(&id);
            Reply::Remove(RemoveResponse { id, removed })
        }
        Command::Clear => {
            cache.clear();
            Reply::Message(MessageResponse::new("Cache cleared"))
        }
        Command::Stats => Reply::Stats(StatsResponse::new(cache.stats())),
        Command::Help => Reply::Message(MessageResponse::new(HELP)),
        Command::Quit => Reply::Message(MessageResponse::new("Bye")),
    }
}
