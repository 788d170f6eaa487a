//! Controlled form inputs. Each one reports the picked value through [`FieldInput`].

use client_core::{FieldChange, FieldInput};
use shared::domain::{MatchPreference, ProductArea, Role, TalkDuration};

/// The change to forward after an input was redrawn, if its value moved.
pub fn forwarded_change<T: Copy + PartialEq>(
    before: Option<T>,
    after: Option<T>,
    to_change: impl Fn(T) -> FieldChange,
) -> Option<FieldChange> {
    match after {
        Some(value) if after != before => Some(to_change(value)),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
fn dropdown<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    id: &str,
    placeholder: &str,
    selected: Option<T>,
    options: &[T],
    label: impl Fn(T) -> String,
    to_change: impl Fn(T) -> FieldChange,
    input: &mut dyn FieldInput,
) {
    let mut picked = selected;
    egui::ComboBox::from_id_salt(id)
        .width(180.0)
        .selected_text(selected.map(&label).unwrap_or_else(|| placeholder.to_string()))
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(&mut picked, Some(*option), label(*option));
            }
        });
    if let Some(change) = forwarded_change(selected, picked, to_change) {
        input.on_field_change(change);
    }
}

pub fn duration_dropdown(ui: &mut egui::Ui, selected: TalkDuration, input: &mut dyn FieldInput) {
    dropdown(
        ui,
        "duration-input",
        "Duration",
        Some(selected),
        TalkDuration::ALL,
        TalkDuration::label,
        FieldChange::Duration,
        input,
    );
}

pub fn role_dropdown(ui: &mut egui::Ui, selected: Option<Role>, input: &mut dyn FieldInput) {
    dropdown(
        ui,
        "role-input",
        "Role",
        selected,
        Role::ALL,
        |role| role.label().to_string(),
        FieldChange::Role,
        input,
    );
}

pub fn product_area_dropdown(
    ui: &mut egui::Ui,
    selected: Option<ProductArea>,
    input: &mut dyn FieldInput,
) {
    dropdown(
        ui,
        "product-area-input",
        "Product Area",
        selected,
        ProductArea::ALL,
        |area| area.label().to_string(),
        FieldChange::ProductArea,
        input,
    );
}

pub fn match_preference_radio(
    ui: &mut egui::Ui,
    selected: MatchPreference,
    enabled: bool,
    input: &mut dyn FieldInput,
) {
    let mut picked = selected;
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            for option in MatchPreference::ALL {
                ui.radio_value(&mut picked, *option, option.label());
            }
        });
    });
    if let Some(change) = forwarded_change(Some(selected), Some(picked), FieldChange::MatchPreference)
    {
        input.on_field_change(change);
    }
}

pub fn save_preference_checkbox(ui: &mut egui::Ui, checked: bool, input: &mut dyn FieldInput) {
    let mut value = checked;
    if ui
        .checkbox(&mut value, "Save my preferences for later")
        .changed()
    {
        input.on_field_change(FieldChange::SavePreference(value));
    }
}
