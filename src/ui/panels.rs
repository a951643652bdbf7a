use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SubscriptionFilter;
use crate::data::model::AgeGroup;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the dropdowns. Each change is dispatched to its handler right away.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Filters");
    ui.separator();

    ui.strong("Subscription type");
    let mut subscription = state.subscription();
    egui::ComboBox::from_id_salt("subscription")
        .selected_text(subscription.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in SubscriptionFilter::choices() {
                ui.selectable_value(&mut subscription, choice, choice.to_string());
            }
        });
    state.set_subscription(subscription);
    ui.add_space(8.0);

    ui.strong("Age group");
    let mut age_group = state.age_group();
    egui::ComboBox::from_id_salt("age_group")
        .selected_text(age_group.label())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in AgeGroup::SELECTABLE {
                ui.selectable_value(&mut age_group, choice, choice.label());
            }
        });
    state.set_age_group(age_group);
    ui.add_space(8.0);

    ui.strong("Gender");
    let mut gender = state.gender().to_string();
    egui::ComboBox::from_id_salt("gender")
        .selected_text(&gender)
        .show_ui(ui, |ui: &mut Ui| {
            for choice in &state.genders {
                ui.selectable_value(&mut gender, choice.clone(), choice);
            }
        });
    state.set_gender(&gender);

    ui.separator();
    match state.clicked_country() {
        Some(country) => ui.label(format!("Selected country: {country}")),
        None => ui.label("Click a country marker on the map."),
    };
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render load diagnostics and the current viewport.
pub fn top_bar(ui: &mut Ui, state: &DashboardState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} subscribers loaded, {} in view",
            state.table().len(),
            state.visible().len()
        ));

        if state.dropped_records > 0 {
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{} of {} rows dropped (no map coordinates for their country)",
                    state.dropped_records, state.rows_read
                ))
                .color(Color32::from_rgb(200, 120, 0)),
            );
        }

        ui.separator();
        let b = state.bounds();
        ui.label(format!(
            "View: {:.1}°..{:.1}° lat, {:.1}°..{:.1}° lon",
            b.south.min(b.north),
            b.south.max(b.north),
            b.west.min(b.east),
            b.west.max(b.east)
        ));
    });
}
