use std::io::{Read, Write};

use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::{Commands, ConversationCommand, MemoryCommand, STDIN_PLACEHOLDER};
use crate::application::LangChainApi;
use crate::domain::{
    AgentTask, ChatRequest, ConfigAnalysisRequest, ConversationalRagQuery, JsonObject,
    LogAnalysisRequest, MemorySession, RagAnswer, RagQuery, RequestError, SummarizeRequest,
    TroubleshootRequest,
};

/// Failure of a CLI command. Either the service call failed or local I/O did.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not format output: {0}")]
    Format(#[from] serde_json::Error),
}

/// Run one command against `api`, writing its output to `out`.
///
/// `input` is only read when a text argument is the `-` placeholder.
pub async fn execute<W, R>(
    command: Commands,
    api: &dyn LangChainApi,
    out: &mut W,
    input: &mut R,
) -> Result<(), CommandError>
where
    W: Write,
    R: Read,
{
    match command {
        Commands::Health => {
            let status = api.health().await?;
            write_pretty(out, &status)?;
        }

        Commands::Info => {
            let info = api.info().await?;
            write_pretty(out, &info)?;
        }

        Commands::Chat {
            message,
            model,
            session,
        } => {
            let mut request = ChatRequest::new(message).with_model_config(model);
            if let Some(session) = session {
                request = request.with_session_id(session);
            }
            let response = api.chat(request).await?;
            writeln!(out, "{}", response)?;
        }

        Commands::Stream { message, model } => {
            let request = ChatRequest::new(message).with_model_config(model);
            let mut fragments = api.chat_stream(request).await?;
            while let Some(fragment) = fragments.next().await {
                write!(out, "{}", fragment?)?;
                out.flush()?;
            }
            writeln!(out)?;
        }

        Commands::Rag {
            question,
            collection,
            k,
        } => {
            let query = RagQuery::new(question)
                .with_collection(collection)
                .with_k(k);
            let answer = api.rag_query(query).await?;
            write_rag_answer(out, &answer)?;
        }

        Commands::RagChat {
            question,
            collection,
            session,
            model,
            k,
        } => {
            let query = RagQuery::new(question)
                .with_collection(collection)
                .with_model_config(model)
                .with_k(k);
            let mut query = ConversationalRagQuery::new(query);
            if let Some(session) = session {
                query = query.with_session_id(session);
            }
            let answer = api.rag_conversational(query).await?;
            write_rag_answer(out, &answer)?;
        }

        Commands::Agent {
            task,
            agent_type,
            verbose_agent,
        } => {
            let task = AgentTask::new(task)
                .with_agent_type(agent_type.as_str())
                .with_verbose(verbose_agent);
            let run = api.run_agent(task).await?;
            writeln!(out, "{}", display(required(run.output(), "output")?))?;
        }

        Commands::Troubleshoot {
            issue,
            verbose_agent,
        } => {
            let request = TroubleshootRequest::new(issue).with_verbose(verbose_agent);
            let result = api.troubleshoot(request).await?;
            writeln!(out, "{}", display(required(result.analysis(), "analysis")?))?;
        }

        Commands::Summarize { text, prompt_type } => {
            let text = if text == STDIN_PLACEHOLDER {
                read_all(input)?
            } else {
                text
            };
            let request = SummarizeRequest::new(text).with_prompt_type(prompt_type);
            let summary = api.summarize(request).await?;
            writeln!(out, "{}", summary)?;
        }

        Commands::AnalyzeLog { input: path, model } => {
            let content = read_file_or_stdin(&path, input)?;
            let request = LogAnalysisRequest::new(content).with_model_config(model);
            let analysis = api.analyze_logs(request).await?;
            writeln!(out, "{}", display(required(analysis.analysis(), "analysis")?))?;
        }

        Commands::AnalyzeConfig {
            input: path,
            config_type,
            model,
        } => {
            let content = read_file_or_stdin(&path, input)?;
            let request = ConfigAnalysisRequest::new(content)
                .with_config_type(config_type)
                .with_model_config(model);
            let analysis = api.analyze_config(request).await?;
            writeln!(out, "{}", display(required(analysis.analysis(), "analysis")?))?;
        }

        Commands::Memory { command } => match command {
            MemoryCommand::Create {
                session,
                memory_type,
                options,
            } => {
                let options: JsonObject = options.into_iter().collect();
                let session = MemorySession::new(session)
                    .with_memory_type(memory_type)
                    .with_options(options);
                let confirmation = api.create_memory(session).await?;
                write_pretty(out, &confirmation)?;
            }
            MemoryCommand::History { session } => {
                let history = api.memory_history(&session).await?;
                if history.is_empty() {
                    writeln!(out, "No messages in session '{}'.", session)?;
                }
                for message in history {
                    writeln!(out, "{}: {}", message.role, message.content)?;
                }
            }
            MemoryCommand::Clear { session } => {
                let confirmation = api.clear_memory(&session).await?;
                write_pretty(out, &confirmation)?;
            }
        },

        Commands::Conversations { command } => match command {
            ConversationCommand::List => {
                let conversations = api.list_conversations().await?;
                write_pretty(out, &conversations)?;
            }
            ConversationCommand::Show { session } => {
                let conversation = api.get_conversation(&session).await?;
                write_pretty(out, &conversation)?;
            }
            ConversationCommand::Delete { session } => {
                let confirmation = api.delete_conversation(&session).await?;
                write_pretty(out, &confirmation)?;
            }
        },
    }

    Ok(())
}

fn write_pretty<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CommandError> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Sources are listed by their `metadata`; a source without one is shown whole.
fn write_rag_answer<W: Write>(out: &mut W, answer: &RagAnswer) -> Result<(), CommandError> {
    writeln!(out, "Answer: {}", display(required(answer.answer(), "answer")?))?;
    writeln!(out)?;
    writeln!(out, "Sources:")?;
    for (i, source) in answer.sources().iter().enumerate() {
        let shown = source.get("metadata").unwrap_or(source);
        writeln!(out, "  {}. {}", i + 1, display(shown))?;
    }
    Ok(())
}

fn required<'a>(value: Option<&'a Value>, field: &'static str) -> Result<&'a Value, RequestError> {
    value.ok_or(RequestError::MissingField(field))
}

/// Strings print bare, any other JSON value in compact form.
fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn read_all<R: Read>(input: &mut R) -> std::io::Result<String> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    Ok(text)
}

fn read_file_or_stdin<R: Read>(path: &str, input: &mut R) -> std::io::Result<String> {
    if path == STDIN_PLACEHOLDER {
        read_all(input)
    } else {
        std::fs::read_to_string(path)
    }
}
