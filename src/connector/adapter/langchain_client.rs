use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::{LangChainApi, TextStream};
use crate::connector::adapter::{decode_text_chunks, ClientConfig};
use crate::domain::{
    AgentRun, AgentTask, ChatRequest, ConfigAnalysis, ConfigAnalysisRequest,
    ConversationalRagQuery, HistoryMessage, JsonObject, LogAnalysis, LogAnalysisRequest,
    MemorySession, RagAnswer, RagQuery, RequestError, SummarizeRequest, TroubleshootRequest,
    Troubleshooting,
};

/// HTTP client for the LangChain service REST API.
///
/// One `reqwest::Client` is built at construction and reused for every call,
/// so connections are pooled for the lifetime of the value. Every request
/// carries `Content-Type: application/json` and is bounded by the configured
/// timeout, which for streamed answers covers the whole body.
#[derive(Debug, Clone)]
pub struct LangChainClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl LangChainClient {
    pub fn new(config: ClientConfig) -> Result<Self, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| RequestError::transport(format!("failed to build HTTP client: {e}")))?;

        debug!(
            "LangChain client targeting {} (timeout {:?})",
            config.base_url(),
            config.timeout()
        );

        Ok(Self { client, config })
    }

    /// Client configured from `LANGCHAIN_URL` / `LANGCHAIN_TIMEOUT`.
    pub fn from_env() -> Result<Self, RequestError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url(), path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Send the request and turn any non-2xx answer into [`RequestError::Status`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, RequestError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LangChain service returned {status}: {body}");
            return Err(RequestError::status(status.as_u16(), body));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        read_json(response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        RequestError::decode(format!("unexpected response body: {e}"))
    })
}

/// Pull one documented field out of a response object.
fn extract<T: DeserializeOwned>(mut body: JsonObject, field: &'static str) -> Result<T, RequestError> {
    let value = body.remove(field).ok_or(RequestError::MissingField(field))?;
    serde_json::from_value(value)
        .map_err(|e| RequestError::decode(format!("field '{field}': {e}")))
}

/// `/{prefix}/{session_id}{suffix}` with the id percent-encoded.
fn session_path(prefix: &str, session_id: &str, suffix: &str) -> String {
    format!("{prefix}/{}{suffix}", urlencoding::encode(session_id))
}

#[async_trait]
impl LangChainApi for LangChainClient {
    async fn health(&self) -> Result<JsonObject, RequestError> {
        self.get_json("/health").await
    }

    async fn info(&self) -> Result<JsonObject, RequestError> {
        self.get_json("/info").await
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, RequestError> {
        debug!(
            "Chat with model config '{}' (session {:?})",
            request.model_config(),
            request.session_id()
        );
        let body: JsonObject = self.post_json("/chat", &request).await?;
        extract(body, "response")
    }

    async fn chat_stream(&self, request: ChatRequest) -> Result<TextStream, RequestError> {
        let response = self
            .send(self.request(Method::POST, "/chat/stream").json(&request))
            .await?;
        Ok(decode_text_chunks(response.bytes_stream()).boxed())
    }

    async fn rag_query(&self, query: RagQuery) -> Result<RagAnswer, RequestError> {
        debug!("RAG query over '{}' (k={})", query.collection(), query.k());
        let answer: RagAnswer = self.post_json("/rag/query", &query).await?;
        debug!("RAG answer cites {} sources", answer.sources().len());
        Ok(answer)
    }

    async fn rag_conversational(
        &self,
        query: ConversationalRagQuery,
    ) -> Result<RagAnswer, RequestError> {
        debug!("Conversational RAG query (session {:?})", query.session_id());
        self.post_json("/rag/conversational", &query).await
    }

    async fn run_agent(&self, task: AgentTask) -> Result<AgentRun, RequestError> {
        debug!("Running {} agent", task.agent_type());
        let run: AgentRun = self.post_json("/agent/run", &task).await?;
        debug!("Agent finished after {} steps", run.intermediate_steps().len());
        Ok(run)
    }

    async fn troubleshoot(
        &self,
        request: TroubleshootRequest,
    ) -> Result<Troubleshooting, RequestError> {
        let result: Troubleshooting = self.post_json("/agent/troubleshoot", &request).await?;
        debug!(
            "Troubleshooting {:?} took {} steps",
            result.issue(),
            result.steps_taken().len()
        );
        Ok(result)
    }

    async fn summarize(&self, request: SummarizeRequest) -> Result<String, RequestError> {
        let body: JsonObject = self.post_json("/summarize", &request).await?;
        extract(body, "summary")
    }

    async fn analyze_logs(&self, request: LogAnalysisRequest) -> Result<LogAnalysis, RequestError> {
        let analysis: LogAnalysis = self.post_json("/summarize/log", &request).await?;
        debug!(
            "Log analysis covered {:?} lines ({:?} chars)",
            analysis.line_count(),
            analysis.log_length()
        );
        Ok(analysis)
    }

    async fn analyze_config(
        &self,
        request: ConfigAnalysisRequest,
    ) -> Result<ConfigAnalysis, RequestError> {
        let analysis: ConfigAnalysis = self.post_json("/summarize/config", &request).await?;
        debug!(
            "Config analysis of {:?} ({:?} chars)",
            analysis.config_type(),
            analysis.config_length()
        );
        Ok(analysis)
    }

    async fn create_memory(&self, session: MemorySession) -> Result<JsonObject, RequestError> {
        debug!(
            "Creating {} memory for session '{}'",
            session.memory_type(),
            session.session_id()
        );
        self.post_json("/memory/create", &session.into_body()).await
    }

    async fn memory_history(&self, session_id: &str) -> Result<Vec<HistoryMessage>, RequestError> {
        let body: JsonObject = self
            .get_json(&session_path("/memory", session_id, "/history"))
            .await?;
        extract(body, "history")
    }

    async fn clear_memory(&self, session_id: &str) -> Result<JsonObject, RequestError> {
        self.delete_json(&session_path("/memory", session_id, "/clear"))
            .await
    }

    async fn list_conversations(&self) -> Result<Vec<JsonObject>, RequestError> {
        let body: JsonObject = self.get_json("/conversations").await?;
        extract(body, "conversations")
    }

    async fn get_conversation(&self, session_id: &str) -> Result<JsonObject, RequestError> {
        self.get_json(&session_path("/conversations", session_id, ""))
            .await
    }

    async fn delete_conversation(&self, session_id: &str) -> Result<JsonObject, RequestError> {
        self.delete_json(&session_path("/conversations", session_id, ""))
            .await
    }
}
