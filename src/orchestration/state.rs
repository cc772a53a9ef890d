use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::ParseResult;
use crate::tools::definition::ToolOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    Parse,
    Execute,
    Format,
    Done,
}

impl Default for PipelinePhase {
    fn default() -> Self {
        PipelinePhase::Parse
    }
}

/// Mutable state scoped to a single query. Created at query start, dropped
/// once the response has been extracted.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub query: String,
    pub phase: PipelinePhase,
    pub parse_result: Option<ParseResult>,
    pub tool_results: Vec<(String, ToolOutput)>,
    pub response: Value,
    pub tools_used: Vec<String>,
    pub error: Option<String>,
}

impl RequestState {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            phase: PipelinePhase::default(),
            parse_result: None,
            tool_results: Vec::new(),
            response: Value::Null,
            tools_used: Vec::new(),
            error: None,
        }
    }

    /// A later call overwrites an earlier result recorded under the same tool
    /// name, keeping its original position.
    pub fn set_result(&mut self, name: &str, output: ToolOutput) {
        if let Some(entry) = self.tool_results.iter_mut().find(|(n, _)| n == name) {
            entry.1 = output;
        } else {
            self.tool_results.push((name.to_string(), output));
        }
    }

    pub fn result(&self, name: &str) -> Option<&ToolOutput> {
        self.tool_results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, output)| output)
    }
}
