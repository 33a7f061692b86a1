//! Waste-collection dashboard: load a sheet of monthly bag counts, derive
//! weights, filter by month and summarize.

pub mod config;
pub mod data;
pub mod error;
pub mod report;

pub use error::{FieldCoercionWarning, PipelineError};
