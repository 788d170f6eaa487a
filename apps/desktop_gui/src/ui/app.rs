//! Ad-lib window: app bar, introduction card and the preferences form.

use std::time::Duration;

use chrono::{Local, Utc};
use client_core::{
    parse_cutoff, FieldChange, FieldInput, FormController, FormPhase, SubmissionResult,
    SubmitOutcome, SUCCESS_MESSAGE,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
};
use crate::ui::widgets;

const INTRO_HEADING: &str = "Meet fellow Googlers now!";
const INTRO_BODY: [&str; 2] = [
    "Miss bumping into new faces at the office? Want an easy, fun, spontaneous way of \
     meeting Googlers virtually? Now you can!",
    "Ad-lib matches you with a fellow Googler in the queue, notifies you through email when \
     you've been matched, and adds an event to your Calendar with a Meet link for you to join \
     immediately! It also provides a starter question to get the conversation flowing!",
];

pub struct AdlibApp {
    controller: FormController,
    cutoff_input: String,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    status: String,
    status_banner: Option<UiError>,
    alert: Option<String>,
}

impl AdlibApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, server_url: String) -> Self {
        Self {
            controller: FormController::new(Utc::now()),
            cutoff_input: Local::now().format("%H:%M").to_string(),
            cmd_tx,
            ui_rx,
            server_url,
            status: "Ready".to_string(),
            status_banner: None,
            alert: None,
        }
    }

    fn reset_form(&mut self) {
        self.controller = FormController::new(Utc::now());
        self.cutoff_input = Local::now().format("%H:%M").to_string();
        self.status = "Ready".to_string();
        self.status_banner = None;
        self.alert = None;
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::SubmissionFinished(result) => {
                    self.controller.finish_submit(&result);
                    match &result {
                        Ok(SubmitOutcome::Confirmed(_)) => {
                            self.status = "Waiting for a match".to_string();
                            self.alert = Some(SUCCESS_MESSAGE.to_string());
                        }
                        Ok(SubmitOutcome::Unconfirmed) => {
                            self.status =
                                "Request sent; the matching service did not confirm it".to_string();
                        }
                        Err(err) => {
                            self.status = "Submission failed".to_string();
                            self.status_banner =
                                Some(UiError::from_client_error(UiErrorContext::Submit, err));
                        }
                    }
                }
                UiEvent::LeftQueue(ack) => {
                    self.status = if ack.is_empty() {
                        "Left the matching queue".to_string()
                    } else {
                        ack
                    };
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn submit(&mut self) {
        match self.controller.begin_submit(Utc::now()) {
            Ok(details) => {
                self.status_banner = None;
                match dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::AddParticipant { details },
                ) {
                    Ok(()) => self.status = "Submitting...".to_string(),
                    Err(status) => {
                        self.controller.abort_submit();
                        self.status_banner =
                            Some(UiError::from_message(UiErrorContext::General, status.clone()));
                        self.status = status;
                    }
                }
            }
            Err(err) => {
                self.alert = Some(
                    self.controller
                        .last_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string()),
                );
            }
        }
    }

    fn leave_queue(&mut self) {
        match dispatch_backend_command(&self.cmd_tx, BackendCommand::LeaveQueue) {
            Ok(()) => self.status = "Leaving the matching queue...".to_string(),
            Err(status) => self.status = status,
        }
    }

    fn show_app_bar(&mut self, ctx: &egui::Context) {
        let mut leave_clicked = false;
        egui::TopBottomPanel::top("app_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Ad-lib");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Leave queue").clicked() {
                            leave_clicked = true;
                        }
                        ui.small(&self.server_url);
                    });
                });
            });
        if leave_clicked {
            self.leave_queue();
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(&self.status);
            });
    }

    fn show_intro_card(ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_max_width(800.0);
                ui.heading(INTRO_HEADING);
                for paragraph in INTRO_BODY {
                    ui.add_space(4.0);
                    ui.label(paragraph);
                }
            });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let draft = self.controller.draft().clone();
        let editable = self.controller.is_editable();
        let mut submit_clicked = false;
        let mut start_over = false;

        ui.add_enabled_ui(editable, |ui| {
            ui.add_space(12.0);
            ui.heading("Choose your time preferences");
            egui::Grid::new("time_preferences")
                .num_columns(2)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    ui.label("I am free until...");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.cutoff_input)
                            .id_salt("time-field")
                            .hint_text("HH:MM")
                            .desired_width(180.0),
                    );
                    if response.changed() {
                        let cutoff = parse_cutoff(&self.cutoff_input, &Local::now());
                        self.controller
                            .on_field_change(FieldChange::TimeAvailableUntil(cutoff));
                    }
                    ui.end_row();

                    ui.label("I want to talk for...");
                    widgets::duration_dropdown(ui, draft.duration, &mut self.controller);
                    ui.end_row();
                });

            ui.add_space(12.0);
            ui.heading("Choose your match preferences");
            ui.horizontal(|ui| {
                widgets::role_dropdown(ui, draft.role, &mut self.controller);
                ui.add_space(16.0);
                widgets::product_area_dropdown(ui, draft.product_area, &mut self.controller);
            });
            ui.add_space(8.0);
            widgets::match_preference_radio(
                ui,
                draft.match_preference,
                self.controller.match_preference_enabled(),
                &mut self.controller,
            );
            if !self.controller.match_preference_enabled() {
                ui.small("Pick a role and product area to choose a match preference.");
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                widgets::save_preference_checkbox(ui, draft.save_preference, &mut self.controller);
                ui.add_space(24.0);
                if ui.button("Submit").clicked() {
                    submit_clicked = true;
                }
            });
        });

        match self.controller.phase() {
            FormPhase::Submitting => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Waiting for the matching service...");
                });
            }
            FormPhase::Submitted(result) => {
                let summary = match result {
                    SubmissionResult::Confirmed => "You are in the queue.".to_string(),
                    SubmissionResult::Unconfirmed => {
                        "Request sent without confirmation.".to_string()
                    }
                    SubmissionResult::Failed(reason) => format!("Submission failed: {reason}"),
                };
                ui.label(summary);
                start_over = ui.button("Start over").clicked();
            }
            FormPhase::Editing | FormPhase::Validating => {}
        }

        if submit_clicked {
            self.submit();
        }
        if start_over {
            self.reset_form();
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        let mut close_requested = false;
        egui::Window::new("Ad-lib")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    close_requested = true;
                }
            });
        if close_requested {
            self.alert = None;
        }
    }
}

impl eframe::App for AdlibApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_app_bar(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                Self::show_intro_card(ui);
                let mut dismiss_banner = false;
                if let Some(banner) = &self.status_banner {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.colored_label(egui::Color32::from_rgb(200, 60, 60), banner.banner());
                        if ui.small_button("Dismiss").clicked() {
                            dismiss_banner = true;
                        }
                    });
                }
                if dismiss_banner {
                    self.status_banner = None;
                }
                self.show_form(ui);
            });
        });
        self.show_alert(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn start_over_clears_banner_and_alert() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let (ui_tx, ui_rx) = bounded(4);
        let mut app = AdlibApp::new(cmd_tx, ui_rx, "http://127.0.0.1:8080".to_string());

        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::Submit,
                "matching service returned 502 Bad Gateway: boom",
            )))
            .expect("send error");
        ui_tx
            .send(UiEvent::SubmissionFinished(Ok(SubmitOutcome::Confirmed(
                serde_json::json!({}),
            ))))
            .expect("send result");
        app.process_ui_events();
        assert!(app.status_banner.is_some());
        assert_eq!(app.alert.as_deref(), Some(SUCCESS_MESSAGE));
        assert!(!app.controller.is_editable());

        app.reset_form();
        assert!(app.status_banner.is_none());
        assert!(app.alert.is_none());
        assert!(app.controller.is_editable());
        assert_eq!(app.status, "Ready");
    }
}
