#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disaster dataset decoding and per-county indexes.
//!
//! Reads the hazard loss CSV into [`Disaster`](disaster_map_disaster_models::Disaster)
//! records and groups them by the raw county name and by start month.

pub mod index;
pub mod reader;

pub use index::{DisasterDataset, DisasterIndex};

use thiserror::Error;

/// Errors that can occur while reading the disaster dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Disaster CSV is missing required column '{column}'")]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },
}
