//! Data layer: loading, cleaning, weights, filtering and totals.
//!
//! Architecture:
//! ```text
//!  .xlsx / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read cells, trim headers, resolve columns → RawTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  drop blank / "Total" rows, parse numbers → RawRecord
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  derive   │  bags × 20 kg → DerivedRecord
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  keep selected periods
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  summary  │  sums → AggregateSummary
//!   └──────────┘
//! ```

pub mod clean;
pub mod derive;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod summary;

pub use filter::FilterSelection;
pub use model::{DerivedRecord, RawRecord, RawTable};
pub use pipeline::{CollectionDataPipeline, DashboardView, Dataset};
pub use summary::AggregateSummary;
