use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{array_field, is_absent, non_empty, JsonObject, DEFAULT_MODEL_CONFIG};

pub const DEFAULT_COLLECTION: &str = "langchain_general";
pub const DEFAULT_RETRIEVAL_K: u32 = 5;

/// Body of `POST /rag/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagQuery {
    question: String,
    collection: String,
    model_config: String,
    k: u32,
}

impl RagQuery {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            collection: DEFAULT_COLLECTION.to_string(),
            model_config: DEFAULT_MODEL_CONFIG.to_string(),
            k: DEFAULT_RETRIEVAL_K,
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_model_config(mut self, model_config: impl Into<String>) -> Self {
        self.model_config = model_config.into();
        self
    }

    /// Number of documents the server should retrieve.
    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn k(&self) -> u32 {
        self.k
    }
}

/// Body of `POST /rag/conversational`: a [`RagQuery`] plus the session whose
/// history the server should take into account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationalRagQuery {
    #[serde(flatten)]
    query: RagQuery,
    #[serde(skip_serializing_if = "is_absent")]
    session_id: Option<String>,
}

impl ConversationalRagQuery {
    pub fn new(query: RagQuery) -> Self {
        Self {
            query,
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = non_empty(session_id);
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

/// Answer of both RAG endpoints.
///
/// The body is kept exactly as the service sent it; the accessors only read
/// the documented keys. Sources are usually document objects carrying a
/// `metadata` map, but plain strings are passed through too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RagAnswer(JsonObject);

impl RagAnswer {
    pub fn answer(&self) -> Option<&Value> {
        self.0.get("answer")
    }

    /// Retrieved documents; empty when the service sent none.
    pub fn sources(&self) -> &[Value] {
        array_field(&self.0, "sources")
    }
}

impl Deref for RagAnswer {
    type Target = JsonObject;

    fn deref(&self) -> &JsonObject {
        &self.0
    }
}
