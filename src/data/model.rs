use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// SubscriptionType – the plan tier of a subscriber
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubscriptionType {
    Basic,
    Standard,
    Premium,
}

impl SubscriptionType {
    pub const ALL: [SubscriptionType; 3] = [
        SubscriptionType::Basic,
        SubscriptionType::Standard,
        SubscriptionType::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Basic => "Basic",
            SubscriptionType::Standard => "Standard",
            SubscriptionType::Premium => "Premium",
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a text value is not one of the known subscription tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSubscriptionType(pub String);

impl FromStr for SubscriptionType {
    type Err = UnknownSubscriptionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Basic" => Ok(SubscriptionType::Basic),
            "Standard" => Ok(SubscriptionType::Standard),
            "Premium" => Ok(SubscriptionType::Premium),
            other => Err(UnknownSubscriptionType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// AgeGroup – bucket derived once from `age` at load time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    From25To35,
    From36To45,
    From46To60,
    Other,
}

impl AgeGroup {
    /// The concrete groups offered as filter choices. `Other` is never selectable.
    pub const SELECTABLE: [AgeGroup; 3] = [
        AgeGroup::From25To35,
        AgeGroup::From36To45,
        AgeGroup::From46To60,
    ];

    /// Bucket an age with closed ranges: 25..=35, 36..=45, 46..=60.
    pub fn from_age(age: u32) -> Self {
        match age {
            25..=35 => AgeGroup::From25To35,
            36..=45 => AgeGroup::From36To45,
            46..=60 => AgeGroup::From46To60,
            _ => AgeGroup::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::From25To35 => "25-35",
            AgeGroup::From36To45 => "36-45",
            AgeGroup::From46To60 => "46-60",
            AgeGroup::Other => "Other",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SubscriberRecord – one fully populated row of the table
// ---------------------------------------------------------------------------

/// A single subscriber after the coordinate join and derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriberRecord {
    pub user_id: u32,
    pub subscription_type: SubscriptionType,
    pub country: String,
    pub device: String,
    pub gender: String,
    pub age: u32,
    pub monthly_revenue: Decimal,
    pub join_date: NaiveDate,
    pub last_payment_date: NaiveDate,
    /// Joined from the country coordinate table.
    pub lat: f64,
    pub lon: f64,
    pub age_group: AgeGroup,
    /// `last_payment_date - join_date`. May be negative; the source does not
    /// guarantee the ordering of the two dates.
    pub subscription_duration_days: i64,
}

// ---------------------------------------------------------------------------
// Table – an immutable, ordered collection of records
// ---------------------------------------------------------------------------

/// Records in load order. There is no mutation API: every filter builds a
/// new `Table` that is a subsequence of its input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<SubscriberRecord>,
}

impl Table {
    pub fn from_records(rows: Vec<SubscriberRecord>) -> Self {
        Table { rows }
    }

    pub fn rows(&self) -> &[SubscriberRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubscriberRecord> {
        self.rows.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy the records matching `keep` into a new table, preserving order.
    pub fn select<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&SubscriberRecord) -> bool,
    {
        Table {
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Sorted set of distinct gender values present in the data.
    pub fn genders(&self) -> BTreeSet<String> {
        self.rows.iter().map(|r| r.gender.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a SubscriberRecord;
    type IntoIter = std::slice::Iter<'a, SubscriberRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ---------------------------------------------------------------------------
// GeoBounds – the visible map viewport
// ---------------------------------------------------------------------------

/// Viewport rectangle in degrees. The fields may arrive in either order
/// (north < south, east < west) depending on the map orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub const WORLD: GeoBounds = GeoBounds {
        north: 90.0,
        south: -90.0,
        east: 180.0,
        west: -180.0,
    };

    /// Closed-rectangle containment after normalising the field order.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let (lat_min, lat_max) = (self.north.min(self.south), self.north.max(self.south));
        let (lon_min, lon_max) = (self.east.min(self.west), self.east.max(self.west));
        (lat_min..=lat_max).contains(&lat) && (lon_min..=lon_max).contains(&lon)
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        GeoBounds::WORLD
    }
}
