use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;

use crate::data::aggregate::{device_counts, revenue_by_country, revenue_by_type, CountryRevenue};
use crate::data::coords;
use crate::data::filter::{
    filter_by_age_group_and_gender, filter_by_all_criteria, filter_by_bounds_and_subscription,
    SubscriptionFilter,
};
use crate::data::loader::LoadedTable;
use crate::data::model::{AgeGroup, GeoBounds, SubscriptionType, Table};

/// How far (in degrees on the lon/lat plane) a click may land from a
/// country's marker and still select it.
pub const CLICK_TOLERANCE_DEG: f64 = 3.0;

// ---------------------------------------------------------------------------
// View models handed to the renderers
// ---------------------------------------------------------------------------

/// A titled (category, value) series for the bar and pie charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub entries: Vec<(String, f64)>,
}

/// The projection of a record shown in the data table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub user_id: u32,
    pub subscription_type: SubscriptionType,
    pub subscription_duration_days: i64,
    pub gender: String,
    pub age_group: AgeGroup,
}

/// Table rows with client-side pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    rows: Vec<TableRow>,
    page_size: usize,
    page: usize,
}

impl TableView {
    fn new(rows: Vec<TableRow>, page_size: usize) -> Self {
        TableView {
            rows,
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Zero-based index of the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// At least one, so an empty table still shows "page 1 of 1".
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    pub fn page_rows(&self) -> &[TableRow] {
        let start = (self.page * self.page_size).min(self.rows.len());
        let end = (start + self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Current selections plus the views derived from them, independent of
/// rendering. Every selection change goes through an event handler that
/// synchronously recomputes exactly the views depending on it.
pub struct DashboardState {
    table: Arc<Table>,

    /// Gender choices, enumerated from the data at load time.
    pub genders: Vec<String>,
    pub rows_read: usize,
    pub dropped_records: usize,

    subscription: SubscriptionFilter,
    age_group: AgeGroup,
    gender: String,
    bounds: GeoBounds,
    clicked_country: Option<String>,

    /// Rows inside the viewport passing the subscription filter.
    visible: Table,
    pub markers: Vec<CountryRevenue>,
    pub revenue_chart: ChartSeries,
    pub device_chart: ChartSeries,
    pub table_view: TableView,
    page_size: usize,
}

impl DashboardState {
    /// Build the initial state with default selections and compute every view.
    pub fn new(loaded: LoadedTable, page_size: usize) -> Self {
        let dropped_records = loaded.dropped_count();
        let table = Arc::new(loaded.table);
        let genders: Vec<String> = table.genders().into_iter().collect();
        let gender = genders.first().cloned().unwrap_or_default();

        let mut state = DashboardState {
            table,
            genders,
            rows_read: loaded.rows_read,
            dropped_records,
            subscription: SubscriptionFilter::All,
            age_group: AgeGroup::From25To35,
            gender,
            bounds: GeoBounds::WORLD,
            clicked_country: None,
            visible: Table::default(),
            markers: Vec::new(),
            revenue_chart: ChartSeries::default(),
            device_chart: ChartSeries::default(),
            table_view: TableView::new(Vec::new(), page_size),
            page_size,
        };
        state.refresh_map();
        state.refresh_revenue_chart();
        state.refresh_device_chart();
        state.refresh_table();
        state
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn subscription(&self) -> SubscriptionFilter {
        self.subscription
    }

    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    pub fn clicked_country(&self) -> Option<&str> {
        self.clicked_country.as_deref()
    }

    pub fn visible(&self) -> &Table {
        &self.visible
    }

    // -- Event handlers --

    pub fn set_subscription(&mut self, subscription: SubscriptionFilter) {
        if self.subscription == subscription {
            return;
        }
        self.subscription = subscription;
        self.refresh_map();
        self.refresh_revenue_chart();
        self.refresh_table();
    }

    pub fn set_bounds(&mut self, bounds: GeoBounds) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        self.refresh_map();
        self.refresh_revenue_chart();
    }

    /// Select the country under a map click. Returns `false` (and changes
    /// nothing) when the click matches no visible country.
    pub fn click_map(&mut self, lat: f64, lon: f64) -> bool {
        match match_click(&self.visible, lat, lon) {
            Some(country) => {
                log::debug!("Map click ({lat:.3}, {lon:.3}) selected {country}");
                self.clicked_country = Some(country);
                self.refresh_revenue_chart();
                true
            }
            None => {
                log::debug!("Map click ({lat:.3}, {lon:.3}) matched no country");
                false
            }
        }
    }

    pub fn set_age_group(&mut self, age_group: AgeGroup) {
        if self.age_group == age_group {
            return;
        }
        self.age_group = age_group;
        self.refresh_device_chart();
        self.refresh_table();
    }

    pub fn set_gender(&mut self, gender: &str) {
        if self.gender == gender {
            return;
        }
        self.gender = gender.to_string();
        self.refresh_device_chart();
        self.refresh_table();
    }

    // -- Recomputation --

    fn refresh_map(&mut self) {
        self.visible = filter_by_bounds_and_subscription(&self.table, self.subscription, &self.bounds);
        self.markers = revenue_by_country(&self.table, self.subscription);
        log::debug!(
            "Map: {} visible rows, {} markers",
            self.visible.len(),
            self.markers.len()
        );
    }

    fn refresh_revenue_chart(&mut self) {
        self.revenue_chart = match &self.clicked_country {
            Some(country) => ChartSeries {
                title: format!("Revenue by Subscription Type in {country}"),
                entries: revenue_by_type(&self.visible, country)
                    .into_iter()
                    .map(|(t, sum)| (t.to_string(), sum.to_f64().unwrap_or_default()))
                    .collect(),
            },
            None => ChartSeries {
                title: "Revenue by Subscription Type (click a country)".to_string(),
                entries: Vec::new(),
            },
        };
    }

    fn refresh_device_chart(&mut self) {
        let subset = filter_by_age_group_and_gender(&self.table, self.age_group, &self.gender);
        self.device_chart = ChartSeries {
            title: format!("Devices used by {}, age {}", self.gender, self.age_group),
            entries: device_counts(&subset)
                .into_iter()
                .map(|(device, n)| (device, n as f64))
                .collect(),
        };
        log::debug!("Devices: {} rows", subset.len());
    }

    fn refresh_table(&mut self) {
        let subset =
            filter_by_all_criteria(&self.table, self.subscription, self.age_group, &self.gender);
        let rows = subset
            .iter()
            .map(|r| TableRow {
                user_id: r.user_id,
                subscription_type: r.subscription_type,
                subscription_duration_days: r.subscription_duration_days,
                gender: r.gender.clone(),
                age_group: r.age_group,
            })
            .collect();
        self.table_view = TableView::new(rows, self.page_size);
    }
}

/// Resolve a click to the nearest coordinate-table country within
/// [`CLICK_TOLERANCE_DEG`], provided that country has rows in `visible`.
pub fn match_click(visible: &Table, lat: f64, lon: f64) -> Option<String> {
    let hit = coords::nearest(lat, lon, CLICK_TOLERANCE_DEG)?;
    visible
        .rows()
        .iter()
        .any(|r| r.country == hit.country)
        .then(|| hit.country.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn loaded() -> LoadedTable {
        let mut rows = vec![
            record("United States", SubscriptionType::Basic, 10),
            record("United States", SubscriptionType::Premium, 20),
            record("Spain", SubscriptionType::Basic, 5),
            record("Spain", SubscriptionType::Standard, 7),
        ];
        rows[1].gender = "Male".to_string();
        rows[1].device = "Laptop".to_string();
        rows[3].age = 40;
        rows[3].age_group = AgeGroup::from_age(40);
        for (i, r) in rows.iter_mut().enumerate() {
            r.user_id = i as u32 + 1;
        }
        LoadedTable {
            table: Table::from_records(rows),
            rows_read: 5,
            unmatched_countries: [("North Korea".to_string(), 1)].into(),
        }
    }

    fn at(country: &str) -> (f64, f64) {
        let c = coords::lookup(country).unwrap();
        (c.lat, c.lon)
    }

    #[test]
    fn initial_views_use_default_selections() {
        let state = DashboardState::new(loaded(), 10);
        assert_eq!(state.genders, ["Female", "Male"]);
        assert_eq!(state.gender(), "Female");
        assert_eq!(state.subscription(), SubscriptionFilter::All);
        assert_eq!(state.age_group(), AgeGroup::From25To35);
        assert_eq!(state.dropped_records, 1);

        assert_eq!(state.markers.len(), 2);
        assert!(state.revenue_chart.entries.is_empty());
        assert_eq!(state.device_chart.entries, [("Smartphone".to_string(), 2.0)]);
        let ids: Vec<_> = state.table_view.page_rows().iter().map(|r| r.user_id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn click_selects_country_and_fills_bar_chart() {
        let mut state = DashboardState::new(loaded(), 10);
        let (lat, lon) = at("United States");
        assert!(state.click_map(lat, lon));
        assert_eq!(state.clicked_country(), Some("United States"));
        assert_eq!(
            state.revenue_chart.entries,
            [("Basic".to_string(), 10.0), ("Premium".to_string(), 20.0)]
        );
    }

    #[test]
    fn near_miss_click_still_selects() {
        let mut state = DashboardState::new(loaded(), 10);
        let (lat, lon) = at("Spain");
        assert!(state.click_map(lat + 0.7, lon - 1.1));
        assert_eq!(state.clicked_country(), Some("Spain"));
    }

    #[test]
    fn unmatched_click_is_a_no_op() {
        let mut state = DashboardState::new(loaded(), 10);
        let (lat, lon) = at("Spain");
        state.click_map(lat, lon);
        let before = state.revenue_chart.clone();

        // Open ocean.
        assert!(!state.click_map(0.0, -160.0));
        // A mapped country with no rows in the data.
        let (lat, lon) = at("Brazil");
        assert!(!state.click_map(lat, lon));

        assert_eq!(state.clicked_country(), Some("Spain"));
        assert_eq!(state.revenue_chart, before);
    }

    #[test]
    fn subscription_change_updates_map_bar_and_table() {
        let mut state = DashboardState::new(loaded(), 10);
        let (lat, lon) = at("United States");
        state.click_map(lat, lon);

        state.set_subscription(SubscriptionFilter::Only(SubscriptionType::Premium));
        assert_eq!(state.markers.len(), 1);
        assert_eq!(state.markers[0].country, "United States");
        assert_eq!(state.revenue_chart.entries, [("Premium".to_string(), 20.0)]);
        // Premium rows are all Male, the table is filtered on Female.
        assert_eq!(state.table_view.total_rows(), 0);
        assert_eq!(state.table_view.page_count(), 1);
        // Devices ignore the subscription filter.
        assert_eq!(state.device_chart.entries.len(), 1);
    }

    #[test]
    fn bounds_change_restricts_clicks_and_bar_chart() {
        let mut state = DashboardState::new(loaded(), 10);
        let (lat, lon) = at("United States");
        state.click_map(lat, lon);

        // Europe only, given south-up.
        state.set_bounds(GeoBounds { north: 35.0, south: 60.0, east: 20.0, west: -10.0 });
        assert_eq!(state.visible().len(), 2);
        assert!(state.revenue_chart.entries.is_empty());
        assert!(!state.click_map(lat, lon));
        // Markers are not clipped to the viewport.
        assert_eq!(state.markers.len(), 2);
    }

    #[test]
    fn age_and_gender_drive_devices_and_table() {
        let mut state = DashboardState::new(loaded(), 10);
        state.set_gender("Male");
        assert_eq!(state.device_chart.entries, [("Laptop".to_string(), 1.0)]);
        assert_eq!(state.table_view.total_rows(), 1);

        state.set_gender("Female");
        state.set_age_group(AgeGroup::From36To45);
        let ids: Vec<_> = state.table_view.page_rows().iter().map(|r| r.user_id).collect();
        assert_eq!(ids, [4]);

        state.set_age_group(AgeGroup::From46To60);
        assert!(state.device_chart.entries.is_empty());
        assert_eq!(state.table_view.total_rows(), 0);
    }

    #[test]
    fn paging_is_clamped_and_resets_on_recompute() {
        let mut state = DashboardState::new(loaded(), 1);
        assert_eq!(state.table_view.page_count(), 2);
        state.table_view.prev_page();
        assert_eq!(state.table_view.page(), 0);
        state.table_view.next_page();
        state.table_view.next_page();
        assert_eq!(state.table_view.page(), 1);
        assert_eq!(state.table_view.page_rows()[0].user_id, 3);

        state.set_subscription(SubscriptionFilter::Only(SubscriptionType::Basic));
        assert_eq!(state.table_view.page(), 0);
    }

    #[test]
    fn empty_table_renders_empty_views() {
        let state = DashboardState::new(LoadedTable::default(), 10);
        assert!(state.genders.is_empty());
        assert!(state.markers.is_empty());
        assert!(state.device_chart.entries.is_empty());
        assert!(state.table_view.page_rows().is_empty());
    }
}
