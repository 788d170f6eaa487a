//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{config::Settings, MatchmakingApi, MatchmakingClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let client = match MatchmakingClient::with_timeout(
            &settings.server_url,
            settings.request_timeout(),
        ) {
            Ok(client) => client,
            Err(err) => {
                tracing::error!("failed to configure matching service client: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Matching service: {}",
            client.base_url()
        )));
        run_worker(Arc::new(client), cmd_rx, ui_tx);
    });
}

/// Processes commands one at a time until the UI side hangs up.
pub fn run_worker(
    api: Arc<dyn MatchmakingApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to build backend runtime: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            return;
        }
    };

    for cmd in cmd_rx.iter() {
        tracing::debug!(command = cmd.name(), "backend worker handling command");
        let event = runtime.block_on(async {
            match cmd {
                BackendCommand::AddParticipant { details } => {
                    UiEvent::SubmissionFinished(api.add_participant(&details).await)
                }
                BackendCommand::LeaveQueue => match api.remove_participant().await {
                    Ok(ack) => UiEvent::LeftQueue(ack),
                    Err(err) => UiEvent::Error(UiError::from_client_error(
                        UiErrorContext::LeaveQueue,
                        &err,
                    )),
                },
            }
        });
        if ui_tx.send(event).is_err() {
            tracing::debug!("ui event receiver dropped; stopping backend worker");
            break;
        }
    }
}
