use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::filter::SubscriptionFilter;
use super::model::{SubscriptionType, Table};

// ---------------------------------------------------------------------------
// Aggregates consumed by the renderers
// ---------------------------------------------------------------------------

/// Total revenue for one country, positioned at the country's coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRevenue {
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub total_revenue: Decimal,
}

/// Map markers: revenue per country over the rows passing `subscription`.
/// Sorted by country name.
pub fn revenue_by_country(table: &Table, subscription: SubscriptionFilter) -> Vec<CountryRevenue> {
    let mut groups: BTreeMap<&str, CountryRevenue> = BTreeMap::new();
    for r in table.iter().filter(|r| subscription.matches(r)) {
        groups
            .entry(r.country.as_str())
            .or_insert_with(|| CountryRevenue {
                country: r.country.clone(),
                lat: r.lat,
                lon: r.lon,
                total_revenue: Decimal::ZERO,
            })
            .total_revenue += r.monthly_revenue;
    }
    groups.into_values().collect()
}

/// Bar chart: revenue per subscription type inside one country. Types with no
/// rows are absent rather than zero.
pub fn revenue_by_type(table: &Table, country: &str) -> BTreeMap<SubscriptionType, Decimal> {
    let mut sums: BTreeMap<SubscriptionType, Decimal> = BTreeMap::new();
    for r in table.iter().filter(|r| r.country == country) {
        *sums.entry(r.subscription_type).or_default() += r.monthly_revenue;
    }
    sums
}

/// Pie chart: number of rows per device.
pub fn device_counts(table: &Table) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in table {
        *counts.entry(r.device.clone()).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn example() -> Table {
        Table::from_records(vec![
            record("United States", SubscriptionType::Basic, 10),
            record("United States", SubscriptionType::Premium, 20),
            record("Spain", SubscriptionType::Basic, 5),
        ])
    }

    #[test]
    fn revenue_by_type_for_one_country() {
        let got = revenue_by_type(&example(), "United States");
        let want = BTreeMap::from([
            (SubscriptionType::Basic, Decimal::from(10)),
            (SubscriptionType::Premium, Decimal::from(20)),
        ]);
        assert_eq!(got, want);
        assert!(!got.contains_key(&SubscriptionType::Standard));
    }

    #[test]
    fn revenue_by_country_sums_all_subscriptions() {
        let got: Vec<_> = revenue_by_country(&example(), SubscriptionFilter::All)
            .into_iter()
            .map(|c| (c.country, c.total_revenue))
            .collect();
        assert_eq!(
            got,
            [
                ("Spain".to_string(), Decimal::from(5)),
                ("United States".to_string(), Decimal::from(30)),
            ]
        );
    }

    #[test]
    fn revenue_by_country_honours_the_subscription_filter() {
        let got = revenue_by_country(&example(), SubscriptionFilter::Only(SubscriptionType::Premium));
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].country, "United States");
        assert_eq!(got[0].total_revenue, Decimal::from(20));
        let us = crate::data::coords::lookup("United States").unwrap();
        assert_eq!((got[0].lat, got[0].lon), (us.lat, us.lon));
    }

    #[test]
    fn type_partition_sums_back_to_the_country_total() {
        let mut rows = vec![
            record("Italy", SubscriptionType::Basic, 0),
            record("Italy", SubscriptionType::Standard, 0),
            record("Italy", SubscriptionType::Premium, 0),
            record("Italy", SubscriptionType::Basic, 0),
            record("France", SubscriptionType::Basic, 99),
        ];
        // Cent values that do not add up exactly in binary floating point.
        for (r, cents) in rows.iter_mut().zip([1099, 1299, 1599, 1099]) {
            r.monthly_revenue = Decimal::new(cents, 2);
        }
        let table = Table::from_records(rows);

        let by_type = revenue_by_type(&table, "Italy");
        let total: Decimal = by_type.values().sum();
        let direct: Decimal = table
            .iter()
            .filter(|r| r.country == "Italy")
            .map(|r| r.monthly_revenue)
            .sum();
        assert_eq!(total, direct);
        assert_eq!(total, Decimal::new(5096, 2));
        assert_eq!(by_type[&SubscriptionType::Basic], Decimal::new(2198, 2));
    }

    #[test]
    fn device_counts_sum_to_row_count() {
        let mut rows = vec![
            record("Spain", SubscriptionType::Basic, 1),
            record("Spain", SubscriptionType::Basic, 1),
            record("Italy", SubscriptionType::Basic, 1),
        ];
        rows[1].device = "Laptop".to_string();
        let table = Table::from_records(rows);
        let counts = device_counts(&table);
        assert_eq!(counts.values().sum::<usize>(), table.len());
        assert_eq!(counts["Smartphone"], 2);
        assert_eq!(counts["Laptop"], 1);
    }

    #[test]
    fn empty_table_gives_empty_aggregates() {
        let empty = Table::default();
        assert!(revenue_by_country(&empty, SubscriptionFilter::All).is_empty());
        assert!(revenue_by_type(&empty, "Spain").is_empty());
        assert!(device_counts(&empty).is_empty());
    }
}
