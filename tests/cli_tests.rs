//! End-to-end tests of the `langchain-client` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("langchain-client").expect("binary not built");
    cmd.env_remove("LANGCHAIN_URL")
        .env_remove("LANGCHAIN_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_subcommand_prints_help_and_fails() {
    cli()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("LangChain Service CLI"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    cli()
        .args(["--timeout", "0", "health"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn test_unknown_agent_type_is_rejected() {
    cli()
        .args(["agent", "restart nginx", "-t", "sre"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sre"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_prints_pretty_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    cli()
        .args(["--url", &server.uri(), "health"])
        .assert()
        .success()
        .stdout("{\n  \"status\": \"healthy\"\n}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_chat_prints_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "message": "What is Docker?",
            "model_config": "code",
            "session_id": "s1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Containers."})))
        .expect(1)
        .mount(&server)
        .await;

    cli()
        .args(["--url", &server.uri(), "chat", "What is Docker?", "-m", "code", "-s", "s1"])
        .assert()
        .success()
        .stdout("Containers.\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_url_can_come_from_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "1"})))
        .mount(&server)
        .await;

    cli()
        .env("LANGCHAIN_URL", server.uri())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": \"1\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rag_lists_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rag/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Use VLANs.",
            "sources": [{"metadata": {"source": "vlan.md"}}]
        })))
        .mount(&server)
        .await;

    cli()
        .args(["--url", &server.uri(), "rag", "How to segment?", "-k", "1"])
        .assert()
        .success()
        .stdout("Answer: Use VLANs.\n\nSources:\n  1. {\"source\":\"vlan.md\"}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summarize_reads_stdin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(body_json(json!({
            "text": "line one\nline two\n",
            "prompt_type": "technical",
            "model_config": "general"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "two lines"})))
        .expect(1)
        .mount(&server)
        .await;

    cli()
        .args(["--url", &server.uri(), "summarize", "-", "-p", "technical"])
        .write_stdin("line one\nline two\n")
        .assert()
        .success()
        .stdout("two lines\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_with_one() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;

    cli()
        .args(["--url", &server.uri(), "agent", "check disk"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: HTTP 500"));
}

#[test]
fn test_unreachable_service_exits_with_one() {
    cli()
        .args(["--url", "http://127.0.0.1:1", "--timeout", "5", "health"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
