use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::JsonObject;

pub const DEFAULT_MEMORY_TYPE: &str = "buffer";

/// Parameters of `POST /memory/create`.
///
/// `memory_type` is one of `buffer`, `buffer_window`, `summary` or
/// `summary_buffer`. Type-specific settings (for example `k` for
/// `buffer_window`) go into the extra options and are merged into the body
/// as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySession {
    session_id: String,
    memory_type: String,
    options: JsonObject,
}

impl MemorySession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            memory_type: DEFAULT_MEMORY_TYPE.to_string(),
            options: JsonObject::new(),
        }
    }

    pub fn with_memory_type(mut self, memory_type: impl Into<String>) -> Self {
        self.memory_type = memory_type.into();
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: JsonObject) -> Self {
        self.options.extend(options);
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn memory_type(&self) -> &str {
        &self.memory_type
    }

    /// Request body: `session_id` and `memory_type` plus every extra option.
    /// An option named like one of the two fixed keys is dropped.
    pub fn into_body(self) -> JsonObject {
        let mut body = JsonObject::new();
        body.insert("session_id".to_string(), Value::String(self.session_id));
        body.insert("memory_type".to_string(), Value::String(self.memory_type));

        for (key, value) in self.options {
            if body.contains_key(&key) {
                warn!("Ignoring memory option '{}': reserved key", key);
                continue;
            }
            body.insert(key, value);
        }
        body
    }
}

/// One entry of a session's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extra_options_are_merged_verbatim() {
        let body = MemorySession::new("s1")
            .with_memory_type("buffer_window")
            .with_option("k", 3)
            .with_option("return_messages", true)
            .into_body();

        assert_eq!(
            Value::Object(body),
            json!({
                "session_id": "s1",
                "memory_type": "buffer_window",
                "k": 3,
                "return_messages": true
            })
        );
    }

    #[test]
    fn reserved_option_keys_do_not_override_named_fields() {
        let body = MemorySession::new("s1")
            .with_option("session_id", "other")
            .with_option("memory_type", "summary")
            .into_body();

        assert_eq!(body["session_id"], "s1");
        assert_eq!(body["memory_type"], "buffer");
        assert_eq!(body.len(), 2);
    }
}
