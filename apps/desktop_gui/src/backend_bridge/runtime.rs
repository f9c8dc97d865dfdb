//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::ScriptClient;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match ScriptClient::new(&server_url) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    err.to_string(),
                )));
                tracing::error!(%server_url, "unusable server url: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!("Ready: {}", client.endpoint())));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::RunScript {
                        request_id,
                        request,
                    } => {
                        let result = client
                            .run_script(&request)
                            .await
                            .map_err(|err| err.to_string());
                        if let Err(err) = &result {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::Submit,
                                err.clone(),
                            )));
                        }
                        if ui_tx
                            .send(UiEvent::ScriptFinished { request_id, result })
                            .is_err()
                        {
                            tracing::debug!("ui event receiver dropped; stopping backend worker");
                            break;
                        }
                    }
                }
            }
        });
    });
}
