/// Data layer: the filter-and-aggregate pipeline behind every view.
///
/// Architecture:
/// ```text
///   subscribers.csv          coords (10 countries)
///        │                        │
///        ▼                        ▼
///   ┌──────────┐   inner join by country name
///   │  loader   │  parse rows, dates → Table (+ dropped counts)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (Table, criteria) → Table, order preserved
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  revenue per country / type, device counts
///   └───────────┘
/// ```

pub mod aggregate;
pub mod coords;
pub mod filter;
pub mod loader;
pub mod model;
