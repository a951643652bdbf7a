use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};
use rust_decimal::prelude::ToPrimitive;

use crate::color::colored_entries;
use crate::data::model::GeoBounds;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Revenue map (lon on x, lat on y)
// ---------------------------------------------------------------------------

const MIN_MARKER_RADIUS: f32 = 4.0;
const MAX_MARKER_RADIUS: f32 = 20.0;

/// Render the country markers. Viewport changes and clicks are fed back into
/// the state after the plot has been drawn.
pub fn revenue_map(ui: &mut Ui, state: &mut DashboardState) {
    let markers = &state.markers;
    let max_revenue = markers
        .iter()
        .filter_map(|m| m.total_revenue.to_f64())
        .fold(0.0_f64, f64::max);
    let selected = state.clicked_country();

    let response = Plot::new("revenue_map")
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(80.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for m in markers {
                let revenue = m.total_revenue.to_f64().unwrap_or_default();
                let color = if selected == Some(m.country.as_str()) {
                    Color32::from_rgb(230, 80, 60)
                } else {
                    Color32::from_rgb(70, 130, 200)
                };
                plot_ui.points(
                    Points::new(vec![[m.lon, m.lat]])
                        .name(format!("{}: {}", m.country, m.total_revenue))
                        .radius(marker_radius(revenue, max_revenue))
                        .color(color)
                        .filled(true),
                );
            }

            let b = plot_ui.plot_bounds();
            let bounds = GeoBounds {
                north: b.max()[1],
                south: b.min()[1],
                east: b.max()[0],
                west: b.min()[0],
            };
            let click = if plot_ui.response().clicked() {
                plot_ui.pointer_coordinate().map(|p| (p.y, p.x))
            } else {
                None
            };
            (bounds, click)
        });

    let (bounds, click) = response.inner;
    state.set_bounds(bounds);
    if let Some((lat, lon)) = click {
        state.click_map(lat, lon);
    }
}

/// Marker area grows with revenue. Negative or missing totals get the
/// smallest marker.
fn marker_radius(revenue: f64, max_revenue: f64) -> f32 {
    let scale = if max_revenue > 0.0 {
        (revenue / max_revenue).clamp(0.0, 1.0).sqrt() as f32
    } else {
        0.0
    };
    MIN_MARKER_RADIUS + (MAX_MARKER_RADIUS - MIN_MARKER_RADIUS) * scale
}

// ---------------------------------------------------------------------------
// Revenue bar chart
// ---------------------------------------------------------------------------

/// Render the revenue-by-subscription-type series as one bar per category.
pub fn revenue_bars(ui: &mut Ui, state: &DashboardState) {
    let series = &state.revenue_chart;
    ui.strong(&series.title);

    if series.entries.is_empty() {
        ui.label("No revenue to show.");
        return;
    }

    Plot::new("revenue_bars")
        .legend(Legend::default())
        .y_axis_label("Monthly revenue")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (label, value, color)) in colored_entries(&series.entries).into_iter().enumerate() {
                let bar = Bar::new(i as f64, value).name(label).fill(color).width(0.6);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(color));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_radius_stays_in_range() {
        assert_eq!(marker_radius(100.0, 100.0), MAX_MARKER_RADIUS);
        assert_eq!(marker_radius(0.0, 100.0), MIN_MARKER_RADIUS);
        assert_eq!(marker_radius(-5.0, 100.0), MIN_MARKER_RADIUS);
        assert_eq!(marker_radius(-5.0, 0.0), MIN_MARKER_RADIUS);
        let mid = marker_radius(25.0, 100.0);
        assert!(mid > MIN_MARKER_RADIUS && mid < MAX_MARKER_RADIUS);
    }
}
