//! Command orchestration helpers from UI actions to backend command queue.

use std::time::Instant;

use client_core::FormController;
use crossbeam_channel::{Sender, TrySendError};
use shared::protocol::RunScriptResponse;

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = match &cmd {
        BackendCommand::RunScript { .. } => "run_script",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected (possible startup failure); restart the app"
                .to_string();
            false
        }
    }
}

/// Starts a submit if none is pending. A command that cannot be queued
/// ends the submit right away as a transport failure.
pub fn submit_form(
    form: &mut FormController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> bool {
    let Some(pending) = form.begin_submit() else {
        return false;
    };
    let request_id = pending.request_id;
    let queued = dispatch_backend_command(
        cmd_tx,
        BackendCommand::RunScript {
            request_id,
            request: pending.request,
        },
        status,
    );
    if !queued {
        form.complete(
            request_id,
            Err::<RunScriptResponse, _>(status.clone()),
            Instant::now(),
        );
    }
    queued
}
