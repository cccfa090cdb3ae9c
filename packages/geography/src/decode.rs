//! Decodes `GeoJSON` feature collections into regions and counties.
//!
//! Features without a polygonal geometry are skipped with a warning, as
//! are county features whose name property is missing or not a string.

use disaster_map_geography_models::{County, GeometryStore, Region};
use geo::MultiPolygon;
use geojson::{Feature, GeoJson};

use crate::GeoError;
use crate::mesh::county_boundary_mesh;

/// Default county name property in the state boundary files.
pub const DEFAULT_COUNTY_NAME_PROPERTY: &str = "NAME_2";

/// Decodes the state outline and county polygons and derives the county
/// boundary mesh.
///
/// # Errors
///
/// Returns [`GeoError`] if either input is not a `GeoJSON` feature
/// collection or contains no polygon features.
pub fn decode_geometry(
    state_geojson: &str,
    counties_geojson: &str,
    region_name: &str,
    county_name_property: &str,
) -> Result<GeometryStore, GeoError> {
    let region = decode_region(state_geojson, region_name)?;
    let counties = decode_counties(counties_geojson, county_name_property)?;
    let mesh = county_boundary_mesh(&counties);

    log::info!(
        "Decoded {} counties for {} ({} boundary mesh segments)",
        counties.len(),
        region.name,
        mesh.0.len()
    );

    Ok(GeometryStore {
        region,
        counties,
        mesh,
    })
}

/// Decodes the state boundary collection into a single [`Region`].
///
/// All polygonal features are merged into one multipolygon.
///
/// # Errors
///
/// Returns [`GeoError`] if the input is not a feature collection or has
/// no polygon features.
pub fn decode_region(geojson: &str, name: &str) -> Result<Region, GeoError> {
    let features = parse_features(geojson, "state boundaries")?;

    let polygons: Vec<_> = features
        .into_iter()
        .filter_map(|feature| feature_multipolygon(&feature))
        .flat_map(|mp| mp.0)
        .collect();

    if polygons.is_empty() {
        return Err(GeoError::Empty {
            source_name: "state boundaries".to_string(),
        });
    }

    Ok(Region {
        name: name.to_string(),
        boundary: MultiPolygon::new(polygons),
    })
}

/// Decodes the county collection, reading each county's name from
/// `name_property`.
///
/// # Errors
///
/// Returns [`GeoError`] if the input is not a feature collection or no
/// feature yields a named polygon.
pub fn decode_counties(geojson: &str, name_property: &str) -> Result<Vec<County>, GeoError> {
    let features = parse_features(geojson, "county boundaries")?;

    let counties: Vec<County> = features
        .into_iter()
        .filter_map(|feature| decode_county(feature, name_property))
        .collect();

    if counties.is_empty() {
        return Err(GeoError::Empty {
            source_name: "county boundaries".to_string(),
        });
    }

    Ok(counties)
}

fn decode_county(feature: Feature, name_property: &str) -> Option<County> {
    let Some(name) = feature
        .property(name_property)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
    else {
        log::warn!("Skipping county feature without a string '{name_property}' property");
        return None;
    };

    let Some(geometry) = feature_multipolygon(&feature) else {
        log::warn!("Skipping county '{name}': geometry is not a polygon");
        return None;
    };

    Some(County::new(
        name,
        geometry,
        feature.properties.unwrap_or_default(),
    ))
}

fn parse_features(geojson: &str, source_name: &str) -> Result<Vec<Feature>, GeoError> {
    match geojson.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(feature) => Ok(vec![feature]),
        GeoJson::Geometry(_) => Err(GeoError::NotAFeatureCollection {
            source_name: source_name.to_string(),
        }),
    }
}

/// Converts a feature's geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn feature_multipolygon(feature: &Feature) -> Option<MultiPolygon<f64>> {
    let geometry = feature.geometry.clone()?;
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}
