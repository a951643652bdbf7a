use std::fmt;

use super::model::{AgeGroup, GeoBounds, SubscriberRecord, SubscriptionType, Table};

// ---------------------------------------------------------------------------
// Subscription selector
// ---------------------------------------------------------------------------

/// The subscription dropdown: either a pass-through or one concrete tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionFilter {
    #[default]
    All,
    Only(SubscriptionType),
}

impl SubscriptionFilter {
    /// Dropdown order: All, Basic, Standard, Premium.
    pub fn choices() -> impl Iterator<Item = SubscriptionFilter> {
        std::iter::once(SubscriptionFilter::All)
            .chain(SubscriptionType::ALL.into_iter().map(SubscriptionFilter::Only))
    }

    pub fn matches(&self, record: &SubscriberRecord) -> bool {
        match self {
            SubscriptionFilter::All => true,
            SubscriptionFilter::Only(t) => record.subscription_type == *t,
        }
    }
}

impl fmt::Display for SubscriptionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionFilter::All => f.write_str("All"),
            SubscriptionFilter::Only(t) => write!(f, "{t}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters: (table, criteria) → new table, input untouched
// ---------------------------------------------------------------------------

/// Rows inside the (normalised) viewport whose tier passes `subscription`.
pub fn filter_by_bounds_and_subscription(
    table: &Table,
    subscription: SubscriptionFilter,
    bounds: &GeoBounds,
) -> Table {
    table.select(|r| bounds.contains(r.lat, r.lon) && subscription.matches(r))
}

/// Exact match on both age group and gender. There is no "All" choice here.
pub fn filter_by_age_group_and_gender(table: &Table, age_group: AgeGroup, gender: &str) -> Table {
    table.select(|r| r.age_group == age_group && r.gender == gender)
}

/// Subscription rule (with "All" pass-through) plus exact age group and gender.
pub fn filter_by_all_criteria(
    table: &Table,
    subscription: SubscriptionFilter,
    age_group: AgeGroup,
    gender: &str,
) -> Table {
    table.select(|r| subscription.matches(r) && r.age_group == age_group && r.gender == gender)
}
