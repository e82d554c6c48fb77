mod commands;

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::connector::ClientConfig;
use crate::domain::{
    DEFAULT_COLLECTION, DEFAULT_CONFIG_TYPE, DEFAULT_MEMORY_TYPE, DEFAULT_MODEL_CONFIG,
    DEFAULT_PROMPT_TYPE, DEFAULT_RETRIEVAL_K,
};

pub use commands::*;

/// Placeholder argument meaning "read the text from standard input".
pub const STDIN_PLACEHOLDER: &str = "-";

#[derive(Parser)]
#[command(name = "langchain-client")]
#[command(author, version, about = "LangChain Service CLI", long_about = None)]
pub struct Cli {
    /// Service URL (falls back to $LANGCHAIN_URL, then the built-in default)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds (falls back to $LANGCHAIN_TIMEOUT, then 120)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Environment first, then explicit flags on top.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Devops,
    Noc,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Devops => "devops",
            AgentKind::Noc => "noc",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check service health
    Health,

    /// Get service info
    Info,

    /// Send chat message
    Chat {
        message: String,

        #[arg(short, long, default_value = DEFAULT_MODEL_CONFIG)]
        model: String,

        #[arg(short, long)]
        session: Option<String>,
    },

    /// Stream a chat answer as it is generated
    Stream {
        message: String,

        #[arg(short, long, default_value = DEFAULT_MODEL_CONFIG)]
        model: String,
    },

    /// RAG query
    Rag {
        question: String,

        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,

        /// Number of documents
        #[arg(short = 'k', default_value_t = DEFAULT_RETRIEVAL_K)]
        k: u32,
    },

    /// RAG query using a session's conversation history
    RagChat {
        question: String,

        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,

        #[arg(short, long)]
        session: Option<String>,

        #[arg(short, long, default_value = DEFAULT_MODEL_CONFIG)]
        model: String,

        #[arg(short = 'k', default_value_t = DEFAULT_RETRIEVAL_K)]
        k: u32,
    },

    /// Run agent task
    Agent {
        task: String,

        #[arg(short = 't', long = "type", value_enum, default_value_t = AgentKind::Devops)]
        agent_type: AgentKind,

        /// Ask the agent for verbose server-side output
        #[arg(long)]
        verbose_agent: bool,
    },

    /// NOC troubleshooting workflow
    Troubleshoot {
        issue: String,

        #[arg(long)]
        verbose_agent: bool,
    },

    /// Summarize text
    Summarize {
        /// Text to summarize (or - for stdin)
        text: String,

        #[arg(short, long, default_value = DEFAULT_PROMPT_TYPE)]
        prompt_type: String,
    },

    /// Analyze a log file
    AnalyzeLog {
        /// Log file (or - for stdin)
        input: String,

        #[arg(short, long, default_value = DEFAULT_MODEL_CONFIG)]
        model: String,
    },

    /// Analyze a device or service configuration file
    AnalyzeConfig {
        /// Configuration file (or - for stdin)
        input: String,

        /// Configuration dialect, e.g. cisco-ios or junos
        #[arg(short = 't', long = "type", default_value = DEFAULT_CONFIG_TYPE)]
        config_type: String,

        #[arg(short, long, default_value = DEFAULT_MODEL_CONFIG)]
        model: String,
    },

    /// Manage conversation memory sessions
    Memory {
        #[command(subcommand)]
        command: MemoryCommand,
    },

    /// Inspect stored conversations
    Conversations {
        #[command(subcommand)]
        command: ConversationCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum MemoryCommand {
    /// Create a memory session
    Create {
        session: String,

        /// buffer, buffer_window, summary or summary_buffer
        #[arg(short = 't', long = "type", default_value = DEFAULT_MEMORY_TYPE)]
        memory_type: String,

        /// Extra key=value settings, e.g. -o k=5
        #[arg(short = 'o', long = "option", value_parser = parse_option)]
        options: Vec<(String, Value)>,
    },

    /// Show a session's message history
    History { session: String },

    /// Clear a session's memory
    Clear { session: String },
}

#[derive(Debug, Subcommand)]
pub enum ConversationCommand {
    List,

    Show { session: String },

    Delete { session: String },
}

/// Parse `key=value`; the value is JSON when it parses as JSON, a string otherwise.
fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod cli_tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn no_subcommand_parses_to_none() {
        let cli = Cli::try_parse_from(["langchain-client"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn timeout_must_be_at_least_one_second() {
        assert!(Cli::try_parse_from(["langchain-client", "--timeout", "0", "health"]).is_err());

        let cli = Cli::try_parse_from(["langchain-client", "health", "--timeout", "3"]).unwrap();
        assert_eq!(cli.timeout, Some(3));
    }

    #[test]
    fn chat_defaults_and_flags() {
        let cli = Cli::try_parse_from(["langchain-client", "chat", "hello"]).unwrap();
        match cli.command {
            Some(Commands::Chat { message, model, session }) => {
                assert_eq!(message, "hello");
                assert_eq!(model, "general");
                assert!(session.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli =
            Cli::try_parse_from(["langchain-client", "chat", "hi", "-m", "code", "-s", "abc"])
                .unwrap();
        match cli.command {
            Some(Commands::Chat { model, session, .. }) => {
                assert_eq!(model, "code");
                assert_eq!(session.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rag_takes_collection_and_k() {
        let cli = Cli::try_parse_from([
            "langchain-client",
            "rag",
            "what is ospf",
            "-c",
            "network_docs",
            "-k",
            "3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Rag { question, collection, k }) => {
                assert_eq!(question, "what is ospf");
                assert_eq!(collection, "network_docs");
                assert_eq!(k, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn agent_type_is_restricted() {
        let cli = Cli::try_parse_from(["langchain-client", "agent", "check disk", "-t", "noc"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Agent { agent_type: AgentKind::Noc, .. })
        ));

        let res = Cli::try_parse_from(["langchain-client", "agent", "x", "-t", "sre"]);
        assert!(res.is_err(), "only devops and noc agents exist");
    }

    #[test]
    fn global_url_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "langchain-client",
            "health",
            "--url",
            "http://localhost:8002/",
            "--timeout",
            "5",
        ])
        .unwrap();
        let config = cli.client_config();
        assert_eq!(config.base_url(), "http://localhost:8002");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn memory_options_parse_as_json_or_string() {
        let cli = Cli::try_parse_from([
            "langchain-client",
            "memory",
            "create",
            "s1",
            "--type",
            "buffer_window",
            "-o",
            "k=3",
            "-o",
            "label=ops team",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Memory {
                command: MemoryCommand::Create { session, memory_type, options },
            }) => {
                assert_eq!(session, "s1");
                assert_eq!(memory_type, "buffer_window");
                assert_eq!(
                    options,
                    vec![
                        ("k".to_string(), json!(3)),
                        ("label".to_string(), json!("ops team")),
                    ]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_option_is_rejected() {
        assert!(parse_option("novalue").is_err());
        assert!(parse_option("=1").is_err());
    }
}
