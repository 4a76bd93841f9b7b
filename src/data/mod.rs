/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, column index (immutable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  company/model spec → view indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  counts, grouped means, rankings, scatter pairs
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered view → CSV
///   └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
