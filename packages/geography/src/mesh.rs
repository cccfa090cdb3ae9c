//! Derives the boundary mesh between neighboring counties.
//!
//! Two counties are neighbors where their rings share an edge. An edge
//! belongs to the mesh when it is shared by counties whose raw names
//! differ; outer state edges and edges between parts of the same county
//! are left out. Consecutive mesh edges are stitched into line strings.

use std::collections::BTreeMap;

use disaster_map_geography_models::County;
use geo::{Coord, LineString, MultiLineString};

/// Coordinates are snapped to this many units per degree before edges are
/// compared, so that vertices decoded from shared arcs line up.
const SNAP_SCALE: f64 = 1e7;

type VertexKey = (i64, i64);

struct Edge<'a> {
    start: Coord<f64>,
    end: Coord<f64>,
    start_key: VertexKey,
    end_key: VertexKey,
    owner: &'a str,
    in_mesh: bool,
}

/// Builds the mesh of edges shared by counties with different names.
#[must_use]
pub fn county_boundary_mesh(counties: &[County]) -> MultiLineString<f64> {
    let mut edges: Vec<Edge<'_>> = Vec::new();
    let mut by_key: BTreeMap<(VertexKey, VertexKey), usize> = BTreeMap::new();

    for county in counties {
        for polygon in &county.geometry {
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                for line in ring.lines() {
                    let start_key = snap(line.start);
                    let end_key = snap(line.end);
                    if start_key == end_key {
                        continue;
                    }

                    let key = if start_key < end_key {
                        (start_key, end_key)
                    } else {
                        (end_key, start_key)
                    };

                    if let Some(&index) = by_key.get(&key) {
                        let edge = &mut edges[index];
                        if edge.owner != county.name {
                            edge.in_mesh = true;
                        }
                    } else {
                        by_key.insert(key, edges.len());
                        edges.push(Edge {
                            start: line.start,
                            end: line.end,
                            start_key,
                            end_key,
                            owner: &county.name,
                            in_mesh: false,
                        });
                    }
                }
            }
        }
    }

    stitch(edges.iter().filter(|edge| edge.in_mesh))
}

fn stitch<'a, 'b: 'a>(edges: impl Iterator<Item = &'a Edge<'b>>) -> MultiLineString<f64> {
    let mut lines: Vec<LineString<f64>> = Vec::new();
    let mut current: Vec<Coord<f64>> = Vec::new();
    let mut current_end: Option<VertexKey> = None;

    for edge in edges {
        if current_end == Some(edge.start_key) {
            current.push(edge.end);
        } else {
            if current.len() >= 2 {
                lines.push(LineString::new(std::mem::take(&mut current)));
            }
            current = vec![edge.start, edge.end];
        }
        current_end = Some(edge.end_key);
    }

    if current.len() >= 2 {
        lines.push(LineString::new(current));
    }

    MultiLineString::new(lines)
}

#[allow(clippy::cast_possible_truncation)]
fn snap(coord: Coord<f64>) -> VertexKey {
    (
        (coord.x * SNAP_SCALE).round() as i64,
        (coord.y * SNAP_SCALE).round() as i64,
    )
}
