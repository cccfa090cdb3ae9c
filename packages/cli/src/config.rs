//! TOML configuration for the choropleth binary.
//!
//! Every section is optional; missing values fall back to the defaults of
//! the embedded Georgia configuration.

use std::cmp::Ordering;
use std::path::Path;

use disaster_map_choropleth::ChoroplethOptions;
use disaster_map_choropleth::classify::CostScale;
use disaster_map_choropleth::hover::StatsOptions;
use disaster_map_geography::decode::DEFAULT_COUNTY_NAME_PROPERTY;
use disaster_map_geography::projection::Mercator;
use disaster_map_geography_models::Region;
use serde::Deserialize;
use thiserror::Error;

/// Built-in configuration used when no `--config` is given.
const DEFAULT_CONFIG: &str = include_str!("../config/georgia.toml");

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

/// The region being mapped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Display name in the region-wide info panel.
    pub name: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: "Georgia".to_string(),
        }
    }
}

/// Where to load the input files from. Each location is a local path or
/// an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// State boundary `GeoJSON`.
    pub state: String,
    /// County boundaries `GeoJSON`.
    pub counties: String,
    /// Disaster CSV.
    pub disasters: String,
    /// County feature property holding the county name.
    pub county_name_property: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            state: "data/ga_state.geojson".to_string(),
            counties: "data/ga_counties.geojson".to_string(),
            disasters: "data/disasters.csv".to_string(),
            county_name_property: DEFAULT_COUNTY_NAME_PROPERTY.to_string(),
        }
    }
}

/// Output canvas and projection settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Margin kept around the state when the projection is fitted.
    pub padding: f64,
    /// Fixed Mercator scale. Requires `translate`.
    pub scale: Option<f64>,
    /// Fixed Mercator translation. Requires `scale`.
    pub translate: Option<[f64; 2]>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 650,
            height: 750,
            padding: 20.0,
            scale: None,
            translate: None,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Region settings.
    pub region: RegionConfig,
    /// Input locations.
    pub assets: AssetsConfig,
    /// Cost bucket scale.
    pub scale: CostScale,
    /// Info panel figure options.
    pub stats: StatsOptions,
    /// Canvas and projection.
    pub canvas: CanvasConfig,
}

impl AppConfig {
    /// Loads the config at `path`, or the embedded default when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// a value is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::parse(&std::fs::read_to_string(path)?)?
            }
            None => Self::parse(DEFAULT_CONFIG)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses a config from TOML text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text does not match the schema.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(text)?)
    }

    /// Checks that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::Invalid {
                message: message.to_string(),
            })
        };

        if self.scale.max.partial_cmp(&self.scale.min) != Some(Ordering::Greater) {
            return invalid("scale.max must be greater than scale.min");
        }
        if self.scale.buckets == 0 {
            return invalid("scale.buckets must be at least 1");
        }
        if self.stats.observation_years.partial_cmp(&0.0) != Some(Ordering::Greater) {
            return invalid("stats.observation_years must be positive");
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return invalid("canvas width and height must be positive");
        }
        if self.canvas.scale.is_some() != self.canvas.translate.is_some() {
            return invalid("canvas.scale and canvas.translate must be set together");
        }

        Ok(())
    }

    /// Classification and panel options for the choropleth.
    #[must_use]
    pub fn choropleth_options(&self) -> ChoroplethOptions {
        ChoroplethOptions {
            scale: self.scale,
            stats: self.stats.clone(),
        }
    }

    /// The configured fixed projection, or one fitted to `region`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if no projection is configured and
    /// the region is too small to fit.
    pub fn projection(&self, region: &Region) -> Result<Mercator, ConfigError> {
        if let (Some(scale), Some(translate)) = (self.canvas.scale, self.canvas.translate) {
            return Ok(Mercator::new(scale, translate));
        }

        Mercator::fit(
            &region.boundary,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
            self.canvas.padding,
        )
        .ok_or_else(|| ConfigError::Invalid {
            message: format!("cannot fit a projection to {}", region.name),
        })
    }
}
