//! SVG path data for projected geometry.

use geo::{Coord, LineString, MultiLineString, MultiPolygon};

use crate::projection::Mercator;

/// Builds the `d` attribute for a polygon outline. Every ring becomes a
/// closed subpath.
#[must_use]
pub fn multipolygon_path(geometry: &MultiPolygon<f64>, projection: &Mercator) -> String {
    let mut d = String::new();

    for polygon in geometry {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            let coords = ring_coords(ring);
            if coords.len() < 3 {
                continue;
            }
            push_subpath(&mut d, coords, projection);
            d.push('Z');
        }
    }

    d
}

/// Builds the `d` attribute for a set of open lines.
#[must_use]
pub fn multilinestring_path(lines: &MultiLineString<f64>, projection: &Mercator) -> String {
    let mut d = String::new();

    for line in lines {
        if line.0.len() < 2 {
            continue;
        }
        push_subpath(&mut d, &line.0, projection);
    }

    d
}

/// Ring coordinates without the closing vertex that repeats the first.
fn ring_coords(ring: &LineString<f64>) -> &[Coord<f64>] {
    let coords = ring.0.as_slice();
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) if coords.len() > 1 && first == last => {
            &coords[..coords.len() - 1]
        }
        _ => coords,
    }
}

fn push_subpath(d: &mut String, coords: &[Coord<f64>], projection: &Mercator) {
    for (i, coord) in coords.iter().enumerate() {
        let p = projection.project(*coord);
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&format_number(p.x));
        d.push(',');
        d.push_str(&format_number(p.y));
    }
}

/// Formats a screen coordinate with at most three decimals and no
/// trailing zeros.
fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    format!("{rounded}")
}
