mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{ExamFetchApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Desktop form for fetching old exam papers")]
struct Args {
    /// Base URL of the script runner.
    #[arg(long, default_value = client_core::DEFAULT_SERVER_URL)]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let startup = StartupConfig {
        server_url: args.server_url,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(startup.server_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Exam Paper Fetcher")
            .with_inner_size([520.0, 360.0])
            .with_min_inner_size([420.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Exam Paper Fetcher",
        options,
        Box::new(move |_cc| Ok(Box::new(ExamFetchApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
}
