/// Data layer: core types, loading, cleaning, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>, validate schema
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  dedup rows, derive email_domain + funding_millions
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ FundingDataset  │  Vec<FundingRecord>, category indices
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  industry/stage/year predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  KPIs, grouped sums, insights
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
