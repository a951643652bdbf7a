use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::TableView;

// ---------------------------------------------------------------------------
// Subscriber table with client-side pagination
// ---------------------------------------------------------------------------

const HEADERS: [&str; 5] = ["User ID", "Subscription", "Duration (days)", "Gender", "Age group"];

pub fn subscriber_table(ui: &mut Ui, view: &mut TableView) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("◀").clicked() {
            view.prev_page();
        }
        ui.label(format!(
            "Page {} of {} ({} rows)",
            view.page() + 1,
            view.page_count(),
            view.total_rows()
        ));
        if ui.small_button("▶").clicked() {
            view.next_page();
        }
    });

    let rows = view.page_rows();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(70.0))
        .columns(Column::remainder(), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for h in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(r.user_id.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.subscription_type.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.subscription_duration_days.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.gender);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.age_group.label());
                });
            });
        });
}
