use std::time::{Duration, Instant};

use client_core::{FormController, FormPhase, DEFAULT_SERVER_URL};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{ExamFilter, SearchOption};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::submit_form;

const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 53, 69);
const LOADING_REPAINT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct StatusBanner {
    label: &'static str,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Validation => "Configuration",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub struct ExamFetchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    form: FormController,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl ExamFetchApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: FormController::with_success_auto_clear(),
            status: format!("Starting backend worker for {}", startup.server_url),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "{}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                    if err.context() == UiErrorContext::BackendStartup {
                        self.status_banner = Some(StatusBanner {
                            label: err_label(err.category()),
                            message: err.message().to_string(),
                        });
                    }
                }
                UiEvent::ScriptFinished { request_id, result } => {
                    self.form.complete(request_id, result, Instant::now());
                }
            }
        }
    }

    fn submit(&mut self) {
        submit_form(&mut self.form, &self.cmd_tx, &mut self.status);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let loading = self.form.is_loading();
        let mut submit_requested = false;

        egui::Grid::new("search_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Option:");
                egui::ComboBox::from_id_salt("search_option")
                    .selected_text(self.form.option.label())
                    .show_ui(ui, |ui| {
                        for option in SearchOption::ALL {
                            ui.selectable_value(&mut self.form.option, option, option.label());
                        }
                    });
                ui.end_row();

                ui.label("Search:");
                let placeholder = self.form.option.placeholder();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.form.value)
                        .hint_text(placeholder)
                        .desired_width(240.0),
                );
                if response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
                    submit_requested = true;
                }
                ui.end_row();

                ui.label("Exam Type Filter:");
                egui::ComboBox::from_id_salt("exam_filter")
                    .selected_text(self.form.exam_filter.label())
                    .show_ui(ui, |ui| {
                        for filter in ExamFilter::ALL {
                            ui.selectable_value(&mut self.form.exam_filter, filter, filter.label());
                        }
                    });
                ui.end_row();

                ui.label("");
                ui.checkbox(&mut self.form.merge_pdfs, "Merge PDFs into single file");
                ui.end_row();
            });

        ui.add_space(8.0);
        if ui
            .add_enabled(!loading, egui::Button::new("Submit"))
            .clicked()
        {
            submit_requested = true;
        }

        if submit_requested {
            self.submit();
        }
    }

    fn show_output(&self, ui: &mut egui::Ui) {
        match self.form.phase() {
            FormPhase::Idle => {}
            FormPhase::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processing, Please wait...");
                });
            }
            FormPhase::Success(message) => {
                ui.colored_label(SUCCESS_COLOR, message.as_str());
            }
            FormPhase::Error(message) => {
                ui.colored_label(ERROR_COLOR, egui::RichText::new(message.as_str()).monospace());
            }
        }
    }
}

impl eframe::App for ExamFetchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let now = Instant::now();
        self.form.tick(now);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Exam Paper Fetcher");
            if let Some(banner) = &self.status_banner {
                ui.colored_label(ERROR_COLOR, format!("{}: {}", banner.label, banner.message));
            }
            ui.add_space(8.0);
            self.show_form(ui);
            ui.add_space(12.0);
            self.show_output(ui);
        });

        if self.form.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT);
        } else if let Some(remaining) = self.form.until_auto_clear(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiError;
    use client_core::form::{SUCCESS_MESSAGE, TRANSPORT_FAILURE_MESSAGE};
    use crossbeam_channel::bounded;
    use shared::protocol::RunScriptResponse;

    fn app() -> (ExamFetchApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(16);
        (
            ExamFetchApp::bootstrap(cmd_tx, ui_rx, StartupConfig::default()),
            cmd_rx,
            ui_tx,
        )
    }

    fn queued_request_id(cmd_rx: &Receiver<BackendCommand>) -> client_core::RequestId {
        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::RunScript { request_id, .. } => request_id,
        }
    }

    #[test]
    fn finished_event_moves_form_to_success() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.submit();
        let request_id = queued_request_id(&cmd_rx);

        ui_tx
            .send(UiEvent::ScriptFinished {
                request_id,
                result: Ok(RunScriptResponse {
                    output: Some("SUCCESS: Downloaded 1/1 file(s)".to_string()),
                    error: None,
                }),
            })
            .expect("send");
        app.process_ui_events();

        assert_eq!(
            app.form.phase(),
            &FormPhase::Success(SUCCESS_MESSAGE.to_string())
        );
    }

    #[test]
    fn failed_event_shows_transport_message() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.submit();
        let request_id = queued_request_id(&cmd_rx);

        ui_tx
            .send(UiEvent::ScriptFinished {
                request_id,
                result: Err("connection refused".to_string()),
            })
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.form.message(), Some(TRANSPORT_FAILURE_MESSAGE));
        assert!(!app.form.is_loading());
    }

    #[test]
    fn startup_error_raises_banner() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "unsupported scheme 'localhost' in server url (expected http or https)",
            )))
            .expect("send");
        app.process_ui_events();

        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.label, "Configuration");
    }
}
