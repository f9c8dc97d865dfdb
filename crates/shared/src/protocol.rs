use serde::{Deserialize, Serialize};

use crate::domain::{ExamFilter, SearchOption};

pub const RUN_SCRIPT_PATH: &str = "/run-script";

/// Script output marker for a completed download run.
pub const SUCCESS_MARKER: &str = "SUCCESS:";
/// Script output marker for a search that matched nothing.
pub const NO_RESULTS_MARKER: &str = "No results found";

/// Body of `POST /run-script`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunScriptRequest {
    pub option: SearchOption,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub merge_pdfs: bool,
    #[serde(default)]
    pub exam_filter: ExamFilter,
}

/// The form's selections as they travel over the wire.
pub type SearchRequest = RunScriptRequest;

/// Whatever the runner sent back. Neither field is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunScriptResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Success { summary: String },
    NoResults,
    Failed { message: Option<String> },
}

impl RunScriptResponse {
    /// Reads `output` and `error` from a decoded body. Only string fields of a
    /// JSON object count; any other body yields an empty response.
    pub fn from_json(body: &serde_json::Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };
        let field = |name: &str| {
            object
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        Self {
            output: field("output"),
            error: field("error"),
        }
    }

    pub fn outcome(&self) -> ScriptOutcome {
        let output = self.output.as_deref().unwrap_or_default();

        if let Some(line) = output.lines().find(|line| line.contains(SUCCESS_MARKER)) {
            return ScriptOutcome::Success {
                summary: line.trim().to_string(),
            };
        }
        if output.contains(NO_RESULTS_MARKER) {
            return ScriptOutcome::NoResults;
        }

        let message = self
            .error
            .as_deref()
            .filter(|error| !error.is_empty())
            .map(str::to_string);
        ScriptOutcome::Failed { message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
