use std::{
    ffi::OsString,
    path::PathBuf,
    process::Stdio,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use shared::{
    error::{ApiException, ErrorCode},
    protocol::RunScriptRequest,
};
use tokio::process::Command;
use tracing::{info, warn};

/// Captured result of one downloader run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptRun {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, request: &RunScriptRequest) -> Result<ScriptRun, ApiException>;
}

#[derive(Debug, Clone)]
pub struct ProcessScriptRunner {
    pub interpreter: String,
    pub script_path: PathBuf,
    pub timeout: Duration,
}

/// Positional arguments the downloader expects:
/// `<option> <value> <True|False> <exam filter>`.
pub fn script_args(request: &RunScriptRequest) -> Vec<OsString> {
    let merge = if request.merge_pdfs { "True" } else { "False" };
    vec![
        request.option.as_arg().into(),
        request.value.clone().into(),
        merge.into(),
        request.exam_filter.as_arg().into(),
    ]
}

#[async_trait]
impl ScriptRunner for ProcessScriptRunner {
    async fn run(&self, request: &RunScriptRequest) -> Result<ScriptRun, ApiException> {
        let mut command = Command::new(&self.interpreter);
        command
            .arg(&self.script_path)
            .args(script_args(request))
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let started = Instant::now();
        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                warn!(
                    interpreter = %self.interpreter,
                    script = %self.script_path.display(),
                    error = %err,
                    "failed to launch downloader script"
                );
                return Err(ApiException::new(
                    ErrorCode::ScriptLaunch,
                    format!("failed to launch {}: {err}", self.interpreter),
                ));
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "downloader script timed out");
                return Err(ApiException::new(
                    ErrorCode::ScriptTimeout,
                    format!("script timed out after {}s", self.timeout.as_secs()),
                ));
            }
        };

        let run = ScriptRun {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        info!(
            option = request.option.as_arg(),
            exam_filter = %request.exam_filter,
            merge_pdfs = request.merge_pdfs,
            exit_code = ?run.exit_code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "downloader script finished"
        );
        Ok(run)
    }
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
