//! The drawing surface the choropleth renders onto.

use disaster_map_geography_models::{County, CountyId, Region};
use geo::MultiLineString;

use crate::hover::InfoField;

/// A drawing target for the choropleth.
///
/// Shapes are drawn once at startup. Text fields are rewritten on every
/// hover transition. Surfaces that support pointer input report events
/// back as [`PointerEvent`](crate::hover::PointerEvent)s carrying the id
/// passed to [`RenderSurface::draw_county`].
pub trait RenderSurface {
    /// Draws the state outline.
    fn draw_region(&mut self, region: &Region);

    /// Draws one county shape with its class string
    /// (`"county <name> <bucket>"`).
    fn draw_county(&mut self, id: CountyId, county: &County, class: &str);

    /// Draws the boundary lines between counties.
    fn draw_mesh(&mut self, mesh: &MultiLineString<f64>);

    /// Replaces the text of an info field.
    fn set_text(&mut self, field: InfoField, text: &str);
}
