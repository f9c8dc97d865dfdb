use std::{process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use client_core::{FormController, FormPhase, ScriptClient};
use shared::domain::{ExamFilter, SearchOption};
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SearchBy {
    Code,
    Name,
}

impl From<SearchBy> for SearchOption {
    fn from(value: SearchBy) -> Self {
        match value {
            SearchBy::Code => SearchOption::CourseCode,
            SearchBy::Name => SearchOption::CourseName,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Fetch old exam papers through the script runner")]
struct Args {
    #[arg(long, default_value = client_core::DEFAULT_SERVER_URL)]
    server_url: String,
    /// Match the search text against the course code or the course name.
    #[arg(long, value_enum, default_value_t = SearchBy::Code)]
    by: SearchBy,
    #[arg(long, default_value = "")]
    value: String,
    /// all, MST, EST or AUX.
    #[arg(long, default_value = "all")]
    exam_filter: ExamFilter,
    #[arg(long)]
    merge_pdfs: bool,
    /// Also print the runner's raw JSON response.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn fill(&self, form: &mut FormController) {
        form.option = self.by.into();
        form.value = self.value.clone();
        form.exam_filter = self.exam_filter;
        form.merge_pdfs = self.merge_pdfs;
    }
}

/// Logs go to stderr so stdout carries only the form's result.
fn log_subscriber() -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .finish()
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    log_subscriber().init();
    let args = Args::parse();

    let client = ScriptClient::new(&args.server_url)?;
    let mut form = FormController::new();
    args.fill(&mut form);

    let pending = form
        .begin_submit()
        .context("a request is already in flight")?;
    println!("Processing, Please wait...");

    let result = client.run_script(&pending.request).await;
    if args.json {
        if let Ok(response) = &result {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
    }
    form.complete(pending.request_id, result, Instant::now());

    match form.phase() {
        FormPhase::Success(message) => {
            println!("{message}");
            Ok(ExitCode::SUCCESS)
        }
        FormPhase::Error(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
        FormPhase::Idle | FormPhase::Loading => Ok(ExitCode::FAILURE),
    }
}
