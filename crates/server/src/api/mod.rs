use std::sync::Arc;

use shared::{
    error::ApiException,
    protocol::{RunScriptRequest, RunScriptResponse, StatusResponse},
};

use crate::runner::ScriptRunner;

pub const BACKEND_RUNNING: &str = "Backend running";

#[derive(Clone)]
pub struct ApiContext {
    pub runner: Arc<dyn ScriptRunner>,
}

pub fn run_script_route() -> &'static str {
    shared::protocol::RUN_SCRIPT_PATH
}

/// Runs the downloader once and relays both streams. Classifying the output
/// is left to the caller.
pub async fn run_script(
    ctx: &ApiContext,
    request: &RunScriptRequest,
) -> Result<RunScriptResponse, ApiException> {
    let run = ctx.runner.run(request).await?;
    Ok(RunScriptResponse {
        output: Some(run.stdout),
        error: Some(run.stderr),
    })
}

pub fn status() -> StatusResponse {
    StatusResponse {
        status: BACKEND_RUNNING.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
