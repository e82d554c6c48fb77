use serde::Serialize;

use super::{is_absent, non_empty, DEFAULT_MODEL_CONFIG};

/// Body of `POST /chat` and `POST /chat/stream`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    message: String,
    model_config: String,
    #[serde(skip_serializing_if = "is_absent")]
    session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            model_config: DEFAULT_MODEL_CONFIG.to_string(),
            session_id: None,
        }
    }

    pub fn with_model_config(mut self, model_config: impl Into<String>) -> Self {
        self.model_config = model_config.into();
        self
    }

    /// Attach server-side conversation memory. Empty ids are ignored.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = non_empty(session_id);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn model_config(&self) -> &str {
        &self.model_config
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}
