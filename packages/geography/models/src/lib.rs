#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region and county geometry types.
//!
//! A [`GeometryStore`] holds everything decoded from the boundary files:
//! the state outline, the county polygons, and the mesh of boundary lines
//! between neighboring counties. Counties carry their property bag and,
//! once the disaster join has run, the disasters attached to them.

use disaster_map_disaster_models::Disaster;
use geo::{MultiLineString, MultiPolygon};

/// Normalizes a county name for matching: surrounding whitespace is
/// trimmed and the result is lowercased.
#[must_use]
pub fn normalize_county_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The state being mapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Display name shown in the region-wide info panel (e.g. "Georgia").
    pub name: String,
    /// Union of all state boundary features.
    pub boundary: MultiPolygon<f64>,
}

/// Position of a county within [`GeometryStore::counties`].
///
/// Render surfaces hand this back with pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountyId(pub usize);

impl std::fmt::Display for CountyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A county polygon with its property bag.
#[derive(Debug, Clone, PartialEq)]
pub struct County {
    /// Raw value of the county name property.
    pub name: String,
    /// County outline.
    pub geometry: MultiPolygon<f64>,
    /// All feature properties as decoded from the boundary file.
    pub properties: serde_json::Map<String, serde_json::Value>,
    /// Disasters attached by the join. `None` until the first match.
    pub disasters: Option<Vec<Disaster>>,
}

impl County {
    /// Creates a county with no disasters attached.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        geometry: MultiPolygon<f64>,
        properties: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            geometry,
            properties,
            disasters: None,
        }
    }

    /// The county name with surrounding whitespace removed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    /// The name used for joining disasters to this county.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_county_name(&self.name)
    }

    /// Attached disasters, empty when nothing matched.
    #[must_use]
    pub fn disasters(&self) -> &[Disaster] {
        self.disasters.as_deref().unwrap_or_default()
    }

    /// Appends a disaster, creating the list on the first match.
    pub fn attach_disaster(&mut self, disaster: Disaster) {
        self.disasters.get_or_insert_with(Vec::new).push(disaster);
    }
}

/// Decoded boundary geometry for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryStore {
    /// State outline.
    pub region: Region,
    /// County polygons in file order.
    pub counties: Vec<County>,
    /// Boundary lines shared by counties with different names.
    pub mesh: MultiLineString<f64>,
}

impl GeometryStore {
    /// Iterates counties along with their ids.
    pub fn counties_with_ids(&self) -> impl Iterator<Item = (CountyId, &County)> {
        self.counties
            .iter()
            .enumerate()
            .map(|(index, county)| (CountyId(index), county))
    }
}
