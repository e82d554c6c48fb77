mod agent;
mod chat;
mod memory;
mod rag;
mod summarize;

pub use agent::*;
pub use chat::*;
pub use memory::*;
pub use rag::*;
pub use summarize::*;

use serde_json::Value;

/// A JSON object as returned by the service when no stricter shape is documented.
pub type JsonObject = serde_json::Map<String, Value>;

/// Model configuration used when the caller does not pick one.
pub const DEFAULT_MODEL_CONFIG: &str = "general";

/// Session ids are optional on several endpoints; an empty one counts as absent.
pub(crate) fn is_absent(session_id: &Option<String>) -> bool {
    session_id.as_deref().map_or(true, str::is_empty)
}

pub(crate) fn non_empty(value: impl Into<String>) -> Option<String> {
    Some(value.into()).filter(|v| !v.is_empty())
}

/// Elements of an array-valued response key; anything else reads as empty.
pub(crate) fn array_field<'a>(fields: &'a JsonObject, key: &str) -> &'a [Value] {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
