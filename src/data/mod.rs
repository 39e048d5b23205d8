/// Data layer: core types, loading, and validation.
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
///   │ Dataset   │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  declared fields, numeric columns, binary outcome
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use crate::config::DashboardConfig;

/// Load a file and check it against the configuration.
pub fn load_dataset(path: &Path, config: &DashboardConfig) -> Result<model::Dataset> {
    let dataset = loader::load_file(path)?;
    validate::validate_dataset(&dataset, config)?;
    Ok(dataset)
}
