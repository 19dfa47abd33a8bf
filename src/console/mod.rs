//! Console Module
//!
//! Line-oriented diagnostics console for inspecting and driving a running
//! note cache.
//!
//! # Commands
//! - `get <id>` - Look up a cached note
//! - `set <id> <json>` - Cache a note payload
//! - `del <id>` - Invalidate a cached note
//! - `clear` - Drop every cached note
//! - `stats` - Show cache statistics
//! - `help` - List commands
//! - `quit` - Stop the console

pub mod commands;
pub mod handler;
pub mod responses;

pub use commands::Command;
pub use handler::handle;
pub use responses::Reply;
