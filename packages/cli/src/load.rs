//! Loads the three input assets and builds the choropleth inputs.
//!
//! The state outline, the county boundaries, and the disaster CSV are
//! fetched concurrently. Any failure aborts the whole load; there is no
//! partial render.

use std::path::PathBuf;

use disaster_map_dataset::reader::parse_disasters_csv;
use disaster_map_dataset::{DatasetError, DisasterDataset};
use disaster_map_geography::GeoError;
use disaster_map_geography::decode::decode_geometry;
use disaster_map_geography_models::GeometryStore;
use thiserror::Error;

use crate::config::AppConfig;

/// Errors that can occur while loading the input assets.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local file could not be read.
    #[error("Failed to read {location}: {source}")]
    Io {
        /// The path that failed.
        location: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A remote file could not be fetched.
    #[error("Failed to fetch: {0}")]
    Http(#[from] reqwest::Error),

    /// A boundary file could not be decoded.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The disaster CSV could not be parsed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Where an asset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    /// A local file.
    Path(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl AssetLocation {
    /// Classifies a configured location string.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for AssetLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Reads the full text of an asset.
///
/// # Errors
///
/// Returns [`LoadError::Io`] for unreadable files and [`LoadError::Http`]
/// for failed or non-success HTTP responses.
pub async fn fetch_text(location: &AssetLocation) -> Result<String, LoadError> {
    log::debug!("Fetching {location}");

    match location {
        AssetLocation::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    location: location.to_string(),
                    source,
                })
        }
        AssetLocation::Url(url) => Ok(reqwest::get(url)
            .await?
            .error_for_status()?
            .text()
            .await?),
    }
}

/// Loads and decodes the state and county boundaries.
///
/// # Errors
///
/// Returns [`LoadError`] if either file cannot be read or decoded.
pub async fn load_geometry(config: &AppConfig) -> Result<GeometryStore, LoadError> {
    let state = AssetLocation::parse(&config.assets.state);
    let counties = AssetLocation::parse(&config.assets.counties);

    let (state_text, counties_text) = tokio::try_join!(fetch_text(&state), fetch_text(&counties))?;

    let geometry = decode_geometry(
        &state_text,
        &counties_text,
        &config.region.name,
        &config.assets.county_name_property,
    )?;

    log::info!(
        "Loaded {} counties for {}",
        geometry.counties.len(),
        geometry.region.name
    );

    Ok(geometry)
}

/// Loads the disaster CSV and builds its indexes.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub async fn load_dataset(config: &AppConfig) -> Result<DisasterDataset, LoadError> {
    let location = AssetLocation::parse(&config.assets.disasters);
    let text = fetch_text(&location).await?;
    let dataset = DisasterDataset::build(parse_disasters_csv(&text)?);

    log::info!(
        "Loaded {} disasters across {} county names",
        dataset.raw.len(),
        dataset.index.by_county.len()
    );

    Ok(dataset)
}

/// Loads every asset concurrently.
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered.
pub async fn load_all(config: &AppConfig) -> Result<(GeometryStore, DisasterDataset), LoadError> {
    tokio::try_join!(load_geometry(config), load_dataset(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_locations() {
        assert_eq!(
            AssetLocation::parse("data/ga_state.geojson"),
            AssetLocation::Path(PathBuf::from("data/ga_state.geojson"))
        );
        assert_eq!(
            AssetLocation::parse(" https://example.com/counties.json "),
            AssetLocation::Url("https://example.com/counties.json".to_string())
        );
        assert_eq!(
            AssetLocation::parse("http://localhost/x.csv"),
            AssetLocation::Url("http://localhost/x.csv".to_string())
        );
    }

    #[tokio::test]
    async fn missing_file_reports_its_location() {
        let location = AssetLocation::parse("does/not/exist.geojson");
        let err = fetch_text(&location).await.unwrap_err();

        match err {
            LoadError::Io { location, .. } => assert_eq!(location, "does/not/exist.geojson"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn loads_dataset_from_local_file() {
        let path = std::env::temp_dir().join(format!(
            "disaster_map_load_{}.csv",
            std::process::id()
        ));
        tokio::fs::write(
            &path,
            "NAME,PROPERTY_DAMAGE,HAZARD_BEGIN_DATE\nFulton,300000,5/10/2011\nCobb,,\n",
        )
        .await
        .unwrap();

        let mut config = AppConfig::default();
        config.assets.disasters = path.display().to_string();
        let dataset = load_dataset(&config).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(dataset.raw.len(), 2);
        assert!(dataset.index.by_county.contains_key("Fulton"));
    }
}
