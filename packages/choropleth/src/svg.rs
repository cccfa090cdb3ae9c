//! A [`RenderSurface`] that produces a standalone SVG document.

use std::collections::BTreeMap;

use disaster_map_geography::path::{multilinestring_path, multipolygon_path};
use disaster_map_geography::projection::Mercator;
use disaster_map_geography_models::{County, CountyId, Region};
use geo::MultiLineString;

use crate::hover::InfoField;
use crate::surface::RenderSurface;

impl InfoField {
    /// Anchor position of the field's text element.
    #[must_use]
    pub const fn position(self) -> (u32, u32) {
        match self {
            Self::Header => (350, 35),
            Self::Years => (100, 725),
            Self::TotalCost => (350, 53),
            Self::AverageCost => (350, 70),
        }
    }
}

/// Collects draw calls into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    projection: Mercator,
    shapes: Vec<String>,
    texts: BTreeMap<InfoField, String>,
}

impl SvgSurface {
    /// Creates an empty `width` x `height` surface.
    #[must_use]
    pub const fn new(width: u32, height: u32, projection: Mercator) -> Self {
        Self {
            width,
            height,
            projection,
            shapes: Vec::new(),
            texts: BTreeMap::new(),
        }
    }

    /// Current text of `field`, if it has been set.
    #[must_use]
    pub fn text(&self, field: InfoField) -> Option<&str> {
        self.texts.get(&field).map(String::as_str)
    }

    /// Number of shapes drawn so far.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Renders the SVG document. Shapes appear in draw order, followed by
    /// the info texts.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            self.width, self.height
        );

        for shape in &self.shapes {
            doc.push_str("  ");
            doc.push_str(shape);
            doc.push('\n');
        }

        for (field, text) in &self.texts {
            let (x, y) = field.position();
            doc.push_str(&format!(
                "  <text x=\"{x}\" y=\"{y}\" class=\"info {field}\">{}</text>\n",
                escape_xml(text)
            ));
        }

        doc.push_str("</svg>\n");
        doc
    }
}

impl RenderSurface for SvgSurface {
    fn draw_region(&mut self, region: &Region) {
        let d = multipolygon_path(&region.boundary, &self.projection);
        self.shapes.push(format!("<path class=\"state\" d=\"{d}\"/>"));
    }

    fn draw_county(&mut self, id: CountyId, county: &County, class: &str) {
        let d = multipolygon_path(&county.geometry, &self.projection);
        self.shapes.push(format!(
            "<path class=\"{}\" data-county-id=\"{id}\" d=\"{d}\"/>",
            escape_xml(class)
        ));
    }

    fn draw_mesh(&mut self, mesh: &MultiLineString<f64>) {
        let d = multilinestring_path(mesh, &self.projection);
        self.shapes
            .push(format!("<path class=\"county-boundary\" d=\"{d}\"/>"));
    }

    fn set_text(&mut self, field: InfoField, text: &str) {
        self.texts.insert(field, text.to_string());
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
