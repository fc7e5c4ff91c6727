/// Data layer: core types, loading, and cleaning.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop invalid rows, derive month/year
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ FundingDataset  │  Vec<FundingRecord>, read-only
///   └────────────────┘
/// ```

pub mod clean;
pub mod loader;
pub mod model;
