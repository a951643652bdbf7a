use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::coords;
use super::model::{AgeGroup, SubscriberRecord, SubscriptionType, Table};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Any failure while loading the source. All variants are fatal: no partial
/// table is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("row {row}: malformed CSV record")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: {column} '{value}' is not a DD-MM-YY date")]
    Date {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: monthly revenue '{value}' is not a decimal number")]
    Revenue {
        row: usize,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },
    #[error("row {row}: unknown subscription type '{value}'")]
    SubscriptionType { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Load result
// ---------------------------------------------------------------------------

/// The loaded table plus what the coordinate join threw away.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub table: Table,
    /// Data rows read from the source, before the join.
    pub rows_read: usize,
    /// Country name → number of records dropped because the country has no
    /// coordinate entry.
    pub unmatched_countries: BTreeMap<String, usize>,
}

impl LoadedTable {
    pub fn dropped_count(&self) -> usize {
        self.unmatched_countries.values().sum()
    }
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

/// Column layout of the source. Headers may use dots (`Subscription.Type`)
/// or spaces (`Subscription Type`); extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "User.ID", alias = "User ID")]
    user_id: u32,
    #[serde(rename = "Subscription.Type", alias = "Subscription Type")]
    subscription_type: String,
    #[serde(rename = "Monthly.Revenue", alias = "Monthly Revenue")]
    monthly_revenue: String,
    #[serde(rename = "Join.Date", alias = "Join Date")]
    join_date: String,
    #[serde(rename = "Last.Payment.Date", alias = "Last Payment Date")]
    last_payment_date: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Device")]
    device: String,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the subscriber table from a CSV file.
pub fn load_csv(path: &Path) -> Result<LoadedTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = load_from_reader(file)?;
    log::info!(
        "Loaded {} of {} subscriber rows from {}",
        loaded.table.len(),
        loaded.rows_read,
        path.display()
    );
    Ok(loaded)
}

/// Parse, join and derive. Records keep their source order.
pub fn load_from_reader<R: Read>(reader: R) -> Result<LoadedTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut unmatched_countries: BTreeMap<String, usize> = BTreeMap::new();
    let mut rows_read = 0;

    for (idx, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|source| LoadError::Csv { row, source })?;
        rows_read += 1;

        // Parse everything first so a malformed row fails even when its
        // country would have been dropped.
        let record = parse_row(row, raw)?;
        match coords::lookup(&record.country) {
            Some(c) => records.push(SubscriberRecord {
                lat: c.lat,
                lon: c.lon,
                ..record
            }),
            None => *unmatched_countries.entry(record.country).or_default() += 1,
        }
    }

    for (country, count) in &unmatched_countries {
        log::warn!("Dropped {count} record(s) for country '{country}' with no map coordinates");
    }

    Ok(LoadedTable {
        table: Table::from_records(records),
        rows_read,
        unmatched_countries,
    })
}

// ---------------------------------------------------------------------------
// Row conversion helpers
// ---------------------------------------------------------------------------

/// Build a record with derived fields. Coordinates are filled in by the join.
fn parse_row(row: usize, raw: RawRow) -> Result<SubscriberRecord, LoadError> {
    let subscription_type =
        raw.subscription_type
            .parse::<SubscriptionType>()
            .map_err(|e| LoadError::SubscriptionType { row, value: e.0 })?;
    let monthly_revenue =
        raw.monthly_revenue
            .parse::<Decimal>()
            .map_err(|source| LoadError::Revenue {
                row,
                value: raw.monthly_revenue.clone(),
                source,
            })?;
    let join_date = parse_date(&raw.join_date).ok_or_else(|| LoadError::Date {
        row,
        column: "Join.Date",
        value: raw.join_date.clone(),
    })?;
    let last_payment_date = parse_date(&raw.last_payment_date).ok_or_else(|| LoadError::Date {
        row,
        column: "Last.Payment.Date",
        value: raw.last_payment_date.clone(),
    })?;

    Ok(SubscriberRecord {
        user_id: raw.user_id,
        subscription_type,
        country: raw.country,
        device: raw.device,
        gender: raw.gender,
        age: raw.age,
        monthly_revenue,
        join_date,
        last_payment_date,
        lat: 0.0,
        lon: 0.0,
        age_group: AgeGroup::from_age(raw.age),
        subscription_duration_days: last_payment_date
            .signed_duration_since(join_date)
            .num_days(),
    })
}

/// Parse `DD-MM-YY`. Every two-digit year is taken to be in the 2000s.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || year.len() != 2 {
        return None;
    }
    if ![day, month, year]
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}
