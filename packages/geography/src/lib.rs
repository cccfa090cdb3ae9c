#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County boundary decoding and map drawing helpers.
//!
//! Decodes the state outline and county polygons from `GeoJSON` feature
//! collections into a [`GeometryStore`](disaster_map_geography_models::GeometryStore),
//! derives the mesh of boundary lines between neighboring counties, and
//! projects geometry into SVG path data with a Mercator projection.

pub mod decode;
pub mod mesh;
pub mod path;
pub mod projection;

use thiserror::Error;

/// Errors that can occur while decoding boundary geometry.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The input was not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    /// The input was valid `GeoJSON` but not a feature collection.
    #[error("Expected a GeoJSON FeatureCollection in {source_name}, found a bare geometry")]
    NotAFeatureCollection {
        /// Label of the input being decoded.
        source_name: String,
    },

    /// No usable polygon features were found.
    #[error("No polygon features found in {source_name}")]
    Empty {
        /// Label of the input being decoded.
        source_name: String,
    },
}

impl From<geojson::Error> for GeoError {
    fn from(value: geojson::Error) -> Self {
        Self::GeoJson(Box::new(value))
    }
}
