use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{JsonObject, DEFAULT_MODEL_CONFIG};

pub const DEFAULT_PROMPT_TYPE: &str = "general";
pub const DEFAULT_CONFIG_TYPE: &str = "generic";

/// Body of `POST /summarize`.
///
/// `prompt_type` selects the summary style on the server: `general`,
/// `technical`, `log`, `config` or `incident`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarizeRequest {
    text: String,
    prompt_type: String,
    model_config: String,
}

impl SummarizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prompt_type: DEFAULT_PROMPT_TYPE.to_string(),
            model_config: DEFAULT_MODEL_CONFIG.to_string(),
        }
    }

    pub fn with_prompt_type(mut self, prompt_type: impl Into<String>) -> Self {
        self.prompt_type = prompt_type.into();
        self
    }

    pub fn with_model_config(mut self, model_config: impl Into<String>) -> Self {
        self.model_config = model_config.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Body of `POST /summarize/log`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogAnalysisRequest {
    log_content: String,
    model_config: String,
}

impl LogAnalysisRequest {
    pub fn new(log_content: impl Into<String>) -> Self {
        Self {
            log_content: log_content.into(),
            model_config: DEFAULT_MODEL_CONFIG.to_string(),
        }
    }

    pub fn with_model_config(mut self, model_config: impl Into<String>) -> Self {
        self.model_config = model_config.into();
        self
    }
}

/// Result of `POST /summarize/log`, kept as the service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogAnalysis(JsonObject);

impl LogAnalysis {
    pub fn analysis(&self) -> Option<&Value> {
        self.0.get("analysis")
    }

    /// Size of the analysed log in characters, as counted by the service.
    pub fn log_length(&self) -> Option<u64> {
        self.0.get("log_length").and_then(Value::as_u64)
    }

    pub fn line_count(&self) -> Option<u64> {
        self.0.get("line_count").and_then(Value::as_u64)
    }
}

impl Deref for LogAnalysis {
    type Target = JsonObject;

    fn deref(&self) -> &JsonObject {
        &self.0
    }
}

/// Body of `POST /summarize/config`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigAnalysisRequest {
    config_content: String,
    config_type: String,
    model_config: String,
}

impl ConfigAnalysisRequest {
    pub fn new(config_content: impl Into<String>) -> Self {
        Self {
            config_content: config_content.into(),
            config_type: DEFAULT_CONFIG_TYPE.to_string(),
            model_config: DEFAULT_MODEL_CONFIG.to_string(),
        }
    }

    /// Vendor dialect of the configuration, e.g. `cisco-ios` or `junos`.
    pub fn with_config_type(mut self, config_type: impl Into<String>) -> Self {
        self.config_type = config_type.into();
        self
    }

    pub fn with_model_config(mut self, model_config: impl Into<String>) -> Self {
        self.model_config = model_config.into();
        self
    }
}

/// Result of `POST /summarize/config`, kept as the service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigAnalysis(JsonObject);

impl ConfigAnalysis {
    pub fn analysis(&self) -> Option<&Value> {
        self.0.get("analysis")
    }

    pub fn config_type(&self) -> Option<&str> {
        self.0.get("config_type").and_then(Value::as_str)
    }

    pub fn config_length(&self) -> Option<u64> {
        self.0.get("config_length").and_then(Value::as_u64)
    }
}

impl Deref for ConfigAnalysis {
    type Target = JsonObject;

    fn deref(&self) -> &JsonObject {
        &self.0
    }
}
