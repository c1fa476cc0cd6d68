//! Roof topology descriptors for flat, gabled, hip, and shed profiles.
//!
//! Faces are continuous-space polygons above the top story; the roof never
//! enters the grid occupancy map. Counts derived from the face list feed the
//! manifold validator.

use std::collections::{BTreeMap, BTreeSet};

use crate::manifold::SolidCounts;
use crate::types::RoofType;

pub const DEFAULT_ROOF_PITCH: f64 = 35.0;

/// One planar face, vertices in winding order.
#[derive(Clone, Debug, PartialEq)]
pub struct RoofFace {
    pub vertices: Vec<[f64; 3]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoofGeometry {
    pub roof_type: RoofType,
    pub faces: Vec<RoofFace>,
}

/// Rise and slope length for a span at the given pitch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoofTrig {
    pub rise: f64,
    pub slope_length: f64,
    pub pitch_deg: f64,
}

pub fn roof_trig(width: f64, pitch_deg: f64) -> RoofTrig {
    let pitch_rad = pitch_deg.to_radians();
    RoofTrig {
        rise: (width / 2.0) * pitch_rad.tan(),
        slope_length: (width / 2.0) / pitch_rad.cos(),
        pitch_deg,
    }
}

fn face(vertices: impl Into<Vec<[f64; 3]>>) -> RoofFace {
    RoofFace { vertices: vertices.into() }
}

/// Build the closed roof solid over the rectangle `(min_x, min_y)` ..
/// `(max_x, max_y)` sitting at `base_z`.
pub fn build_roof(
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    base_z: f64,
    roof_type: RoofType,
) -> RoofGeometry {
    let rise = roof_trig(max_x - min_x, DEFAULT_ROOF_PITCH).rise;

    let c0 = [min_x, min_y, base_z];
    let c1 = [max_x, min_y, base_z];
    let c2 = [max_x, max_y, base_z];
    let c3 = [min_x, max_y, base_z];

    let faces = match roof_type {
        RoofType::Flat => {
            vec![face([c0, c1, c2, c3]), face([c3, c2, c1, c0])]
        }
        RoofType::Gabled => {
            let mid_x = (min_x + max_x) / 2.0;
            let ridge_a = [mid_x, min_y, base_z + rise];
            let ridge_b = [mid_x, max_y, base_z + rise];
            vec![
                face([c0, ridge_a, ridge_b, c3]),
                face([c1, c2, ridge_b, ridge_a]),
                face([c0, c1, ridge_a]),
                face([c3, ridge_b, c2]),
                face([c3, c2, c1, c0]),
            ]
        }
        RoofType::Hip => {
            let apex = [(min_x + max_x) / 2.0, (min_y + max_y) / 2.0, base_z + rise];
            vec![
                face([c0, c1, apex]),
                face([c1, c2, apex]),
                face([c2, c3, apex]),
                face([c3, c0, apex]),
                face([c3, c2, c1, c0]),
            ]
        }
        RoofType::Shed => {
            // Wedge rising toward max_x.
            let h1 = [max_x, min_y, base_z + rise];
            let h2 = [max_x, max_y, base_z + rise];
            vec![
                face([c0, h1, h2, c3]),
                face([c1, c2, h2, h1]),
                face([c0, c1, h1]),
                face([c3, h2, c2]),
                face([c3, c2, c1, c0]),
            ]
        }
    };

    RoofGeometry { roof_type, faces }
}

impl RoofGeometry {
    /// Topology counts for the face list: unique vertices, unique undirected
    /// perimeter edges, faces. Vertices compare by exact bit pattern, which
    /// is sound here because shared corners are built from the same
    /// expressions.
    pub fn solid_counts(&self) -> SolidCounts {
        let mut vertex_ids: BTreeMap<[u64; 3], u32> = BTreeMap::new();
        let mut edges: BTreeSet<(u32, u32)> = BTreeSet::new();

        for roof_face in &self.faces {
            let ids: Vec<u32> = roof_face
                .vertices
                .iter()
                .map(|v| {
                    let key = [v[0].to_bits(), v[1].to_bits(), v[2].to_bits()];
                    let next = vertex_ids.len() as u32;
                    *vertex_ids.entry(key).or_insert(next)
                })
                .collect();
            for (index, &a) in ids.iter().enumerate() {
                let b = ids[(index + 1) % ids.len()];
                edges.insert((a.min(b), a.max(b)));
            }
        }

        SolidCounts {
            vertices: vertex_ids.len() as u32,
            edges: edges.len() as u32,
            faces: self.faces.len() as u32,
        }
    }
}
