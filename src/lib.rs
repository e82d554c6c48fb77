pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{LangChainApi, TextStream};

pub use connector::{decode_text_chunks, ClientConfig, LangChainClient};

pub use domain::{
    AgentRun, AgentTask, ChatRequest, ConfigAnalysis, ConfigAnalysisRequest,
    ConversationalRagQuery, HistoryMessage, JsonObject, LogAnalysis, LogAnalysisRequest,
    MemorySession, RagAnswer, RagQuery, RequestError, SummarizeRequest,
    TroubleshootRequest, Troubleshooting,
};
