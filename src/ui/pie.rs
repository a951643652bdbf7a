use std::f32::consts::TAU;

use eframe::egui::{self, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};

use crate::color::colored_entries;
use crate::state::ChartSeries;

/// Angular step used to approximate each slice's arc.
const ARC_STEP: f32 = 0.05;

// ---------------------------------------------------------------------------
// Pie chart (device counts)
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, series: &ChartSeries) {
    ui.strong(&series.title);

    let total: f64 = series.entries.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        ui.label("No subscribers match this selection.");
        return;
    }
    let slices = colored_entries(&series.entries);

    ui.horizontal(|ui: &mut Ui| {
        let side = ui.available_height().min(ui.available_width() * 0.6).max(80.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let center = response.rect.center();
        let radius = side * 0.45;

        let mut start = -TAU / 4.0;
        for (_, value, color) in &slices {
            let sweep = (*value / total) as f32 * TAU;
            let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
            // Triangle fan: each wedge is convex regardless of the slice size.
            for k in 0..steps {
                let a0 = start + sweep * k as f32 / steps as f32;
                let a1 = start + sweep * (k + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, on_circle(center, radius, a0), on_circle(center, radius, a1)],
                    *color,
                    Stroke::NONE,
                ));
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (label, value, color) in &slices {
                let share = value / total * 100.0;
                ui.label(RichText::new(format!("■ {label}: {value} ({share:.1}%)")).color(*color));
            }
        });
    });
}

fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + egui::vec2(angle.cos(), angle.sin()) * radius
}
