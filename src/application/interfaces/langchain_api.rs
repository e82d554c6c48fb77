use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::{
    AgentRun, AgentTask, ChatRequest, ConfigAnalysis, ConfigAnalysisRequest,
    ConversationalRagQuery, HistoryMessage, JsonObject, LogAnalysis, LogAnalysisRequest,
    MemorySession, RagAnswer, RagQuery, RequestError, SummarizeRequest, TroubleshootRequest,
    Troubleshooting,
};

/// Text fragments of a streamed chat answer, in arrival order.
pub type TextStream = BoxStream<'static, Result<String, RequestError>>;

/// Operations offered by the LangChain service.
///
/// Every call is a single request/response exchange. Nothing is retried:
/// transport failures and non-2xx answers come back as [`RequestError`].
#[async_trait]
pub trait LangChainApi: Send + Sync {
    async fn health(&self) -> Result<JsonObject, RequestError>;

    async fn info(&self) -> Result<JsonObject, RequestError>;

    /// Send a chat message and return the assistant's reply text.
    async fn chat(&self, request: ChatRequest) -> Result<String, RequestError>;

    /// Send a chat message and stream the reply as it is generated.
    ///
    /// The request is sent and its status checked before this returns; the
    /// body is consumed lazily by the returned stream.
    async fn chat_stream(&self, request: ChatRequest) -> Result<TextStream, RequestError>;

    async fn rag_query(&self, query: RagQuery) -> Result<RagAnswer, RequestError>;

    /// RAG query that takes the session's conversation history into account.
    async fn rag_conversational(
        &self,
        query: ConversationalRagQuery,
    ) -> Result<RagAnswer, RequestError>;

    async fn run_agent(&self, task: AgentTask) -> Result<AgentRun, RequestError>;

    async fn troubleshoot(
        &self,
        request: TroubleshootRequest,
    ) -> Result<Troubleshooting, RequestError>;

    /// Summarize text and return the summary.
    async fn summarize(&self, request: SummarizeRequest) -> Result<String, RequestError>;

    async fn analyze_logs(&self, request: LogAnalysisRequest) -> Result<LogAnalysis, RequestError>;

    async fn analyze_config(
        &self,
        request: ConfigAnalysisRequest,
    ) -> Result<ConfigAnalysis, RequestError>;

    async fn create_memory(&self, session: MemorySession) -> Result<JsonObject, RequestError>;

    async fn memory_history(&self, session_id: &str) -> Result<Vec<HistoryMessage>, RequestError>;

    async fn clear_memory(&self, session_id: &str) -> Result<JsonObject, RequestError>;

    async fn list_conversations(&self) -> Result<Vec<JsonObject>, RequestError>;

    async fn get_conversation(&self, session_id: &str) -> Result<JsonObject, RequestError>;

    async fn delete_conversation(&self, session_id: &str) -> Result<JsonObject, RequestError>;
}
