use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{array_field, JsonObject};

pub const DEFAULT_AGENT_TYPE: &str = "devops";

/// Body of `POST /agent/run`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentTask {
    task: String,
    agent_type: String,
    verbose: bool,
}

impl AgentTask {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            agent_type: DEFAULT_AGENT_TYPE.to_string(),
            verbose: false,
        }
    }

    /// Agent flavour on the server, e.g. `devops` or `noc`.
    pub fn with_agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = agent_type.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn agent_type(&self) -> &str {
        &self.agent_type
    }
}

/// Result of `POST /agent/run`, kept as the service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentRun(JsonObject);

impl AgentRun {
    pub fn output(&self) -> Option<&Value> {
        self.0.get("output")
    }

    /// Tool invocations the agent made; only filled in for verbose runs.
    pub fn intermediate_steps(&self) -> &[Value] {
        array_field(&self.0, "intermediate_steps")
    }
}

impl Deref for AgentRun {
    type Target = JsonObject;

    fn deref(&self) -> &JsonObject {
        &self.0
    }
}

/// Body of `POST /agent/troubleshoot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TroubleshootRequest {
    issue: String,
    verbose: bool,
}

impl TroubleshootRequest {
    pub fn new(issue: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }
}

/// Result of the NOC troubleshooting workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Troubleshooting(JsonObject);

impl Troubleshooting {
    /// The issue as the service restated it.
    pub fn issue(&self) -> Option<&str> {
        self.0.get("issue").and_then(Value::as_str)
    }

    pub fn analysis(&self) -> Option<&Value> {
        self.0.get("analysis")
    }

    pub fn steps_taken(&self) -> &[Value] {
        array_field(&self.0, "steps_taken")
    }
}

impl Deref for Troubleshooting {
    type Target = JsonObject;

    fn deref(&self) -> &JsonObject {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn agent_task_defaults_to_quiet_devops() {
        let body = serde_json::to_value(AgentTask::new("restart nginx")).unwrap();
        assert_eq!(
            body,
            json!({"task": "restart nginx", "agent_type": "devops", "verbose": false})
        );
    }

    #[test]
    fn troubleshoot_request_carries_verbose_flag() {
        let body = serde_json::to_value(TroubleshootRequest::new("BGP flap").with_verbose(true))
            .unwrap();
        assert_eq!(body, json!({"issue": "BGP flap", "verbose": true}));
    }

    #[test]
    fn agent_run_parses_steps() {
        let run: AgentRun = serde_json::from_value(json!({
            "output": "done",
            "intermediate_steps": [["tool", "result"]]
        }))
        .unwrap();
        assert_eq!(run.output(), Some(&json!("done")));
        assert_eq!(run.intermediate_steps(), &[json!(["tool", "result"])]);
        assert_eq!(run.len(), 2);
    }

    #[test]
    fn agent_run_passes_null_output_through() {
        let body = json!({"output": null, "intermediate_steps": []});
        let run: AgentRun = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(run.output(), Some(&Value::Null));
        assert_eq!(serde_json::to_value(&run).unwrap(), body);
    }

    #[test]
    fn troubleshooting_without_issue_is_not_filled_in() {
        let body = json!({"analysis": "check the uplink"});
        let result: Troubleshooting = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(result.issue(), None);
        assert!(result.steps_taken().is_empty());
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
    }
}
