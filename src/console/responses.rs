//! Console replies
//!
//! JSON bodies written back for each console command.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Any reply the console can print.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Get(GetResponse),
    Set(SetResponse),
    Remove(RemoveResponse),
    Stats(StatsResponse),
    Message(MessageResponse),
    Error(ErrorResponse),
}

/// Reply to `get <id>`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub id: String,
    /// Whether the note was served from the cache
    pub hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Value>,
}

impl GetResponse {
    pub fn new(id: impl Into<String>, note: Option<Arc<Value>>) -> Self {
        Self {
            id: id.into(),
            hit: note.is_some(),
            note: note.map(|note| Value::clone(&note)),
        }
    }
}

/// Reply to `set <id> <json>`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub id: String,
}

impl SetResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Note '{}' cached", id),
            id,
        }
    }
}

/// Reply to `del <id>`
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub id: String,
    /// False when nothing was cached under the id
    pub removed: bool,
}

/// Reply to `stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// Snapshot time in ISO 8601 format
    pub timestamp: String,
}

impl StatsResponse {
    pub fn new(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Free-form acknowledgement (`clear`, `help`, `quit`)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply to input that could not be parsed
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_hit_serialize() {
        let resp = GetResponse::new("n1", Some(Arc::new(json!({"title": "Cells"}))));
        let json = serde_json::to_value(Reply::Get(resp)).unwrap();
        assert_eq!(json, json!({"id": "n1", "hit": true, "note": {"title": "Cells"}}));
    }

    #[test]
    fn test_get_response_miss_omits_note() {
        let json = serde_json::to_value(GetResponse::new("n1", None)).unwrap();
        assert_eq!(json, json!({"id": "n1", "hit": false}));
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let mut stats = CacheStats::new(50, 600_000);
        stats.hits = 3;
        stats.misses = 1;

        let json = serde_json::to_value(StatsResponse::new(stats)).unwrap();
        assert_eq!(json["max_size"], 50);
        assert_eq!(json["hits"], 3);
        assert_eq!(json["hit_rate"], 0.75);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&Reply::Error(ErrorResponse::new("bad input"))).unwrap();
        assert_eq!(json, r#"{"error":"bad input"}"#);
    }
}
