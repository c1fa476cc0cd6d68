//! Generated output models and their canonical byte encoding.
//!
//! `canonical_bytes` is the stable little-endian encoding used by the
//! determinism tests and the CLI fingerprint: two generation runs agree iff
//! their canonical bytes agree.

use xxhash_rust::xxh3::xxh3_64;

use crate::atoms::OpeningParams;
use crate::compose::{CompositionTree, NodeId};
use crate::occupancy::SceneOccupancy;
use crate::types::{GridPos, ObjectId, ObjectKind, OpeningKind, RoofType, SlotId};

use super::mesh::MeshReport;
use super::roof::RoofGeometry;

/// A child attached during generation, with the local parameters the mesh
/// emitter needs.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedOpening {
    pub wall: ObjectId,
    pub slot: SlotId,
    pub object: ObjectId,
    pub node: NodeId,
    pub params: OpeningParams,
}

/// Result of the `create_wall` path: one placed wall composite.
#[derive(Clone, Debug)]
pub struct GeneratedWall {
    pub tree: CompositionTree,
    pub root: NodeId,
    pub occupancy: SceneOccupancy,
    pub openings: Vec<PlacedOpening>,
    pub mesh: MeshReport,
}

/// Result of the `generate_building` path.
#[derive(Clone, Debug)]
pub struct GeneratedBuilding {
    pub tree: CompositionTree,
    pub walls: Vec<NodeId>,
    pub occupancy: SceneOccupancy,
    pub openings: Vec<PlacedOpening>,
    pub roof: RoofGeometry,
    pub mesh: MeshReport,
}

fn push_str(bytes: &mut Vec<u8>, value: &str) {
    bytes.extend((value.len() as u32).to_le_bytes());
    bytes.extend(value.as_bytes());
}

fn push_pos(bytes: &mut Vec<u8>, pos: GridPos) {
    bytes.extend(pos.x.to_le_bytes());
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.z.to_le_bytes());
}

fn kind_code(kind: ObjectKind) -> u8 {
    match kind {
        ObjectKind::Wall => 0,
        ObjectKind::Opening(OpeningKind::Door) => 1,
        ObjectKind::Opening(OpeningKind::Window) => 2,
    }
}

fn encode_node(bytes: &mut Vec<u8>, tree: &CompositionTree, node_id: NodeId) {
    let node = tree.node(node_id);
    let object = node.object();

    push_str(bytes, object.id().as_str());
    push_str(bytes, object.name());
    bytes.push(kind_code(object.kind()));

    bytes.extend((object.footprint().len() as u32).to_le_bytes());
    for cell in object.footprint().iter() {
        push_pos(bytes, cell);
    }

    bytes.extend((object.reserved_slots().len() as u32).to_le_bytes());
    for (slot, region) in object.reserved_slots() {
        push_str(bytes, slot.as_str());
        bytes.extend((region.len() as u32).to_le_bytes());
        for cell in region.iter() {
            push_pos(bytes, cell);
        }
    }

    bytes.extend((node.children().len() as u32).to_le_bytes());
    for (slot, child) in node.children() {
        push_str(bytes, slot.as_str());
        encode_node(bytes, tree, *child);
    }
}

fn encode_occupancy(bytes: &mut Vec<u8>, occupancy: &SceneOccupancy) {
    bytes.extend((occupancy.occupied_cells() as u32).to_le_bytes());
    for (cell, id) in occupancy.iter() {
        push_pos(bytes, cell);
        push_str(bytes, id.as_str());
    }
}

fn encode_openings(bytes: &mut Vec<u8>, openings: &[PlacedOpening]) {
    bytes.extend((openings.len() as u32).to_le_bytes());
    for opening in openings {
        push_str(bytes, opening.wall.as_str());
        push_str(bytes, opening.slot.as_str());
        push_str(bytes, opening.object.as_str());
        match opening.params {
            OpeningParams::Door { swing, knob_height_m } => {
                bytes.push(0);
                bytes.push(swing.code());
                bytes.extend(knob_height_m.to_bits().to_le_bytes());
            }
            OpeningParams::Window { sill_m, frame_inset_m } => {
                bytes.push(1);
                bytes.extend(sill_m.to_bits().to_le_bytes());
                bytes.extend(frame_inset_m.to_bits().to_le_bytes());
            }
        }
    }
}

fn encode_mesh(bytes: &mut Vec<u8>, mesh: &MeshReport) {
    bytes.extend((mesh.len() as u32).to_le_bytes());
    for report in &mesh.solids {
        push_str(bytes, &report.solid);
        bytes.extend(report.counts.vertices.to_le_bytes());
        bytes.extend(report.counts.edges.to_le_bytes());
        bytes.extend(report.counts.faces.to_le_bytes());
    }
}

fn encode_roof(bytes: &mut Vec<u8>, roof: &RoofGeometry) {
    bytes.push(match roof.roof_type {
        RoofType::Flat => 0,
        RoofType::Gabled => 1,
        RoofType::Hip => 2,
        RoofType::Shed => 3,
    });
    bytes.extend((roof.faces.len() as u32).to_le_bytes());
    for face in &roof.faces {
        bytes.extend((face.vertices.len() as u32).to_le_bytes());
        for vertex in &face.vertices {
            for component in vertex {
                bytes.extend(component.to_bits().to_le_bytes());
            }
        }
    }
}

impl GeneratedWall {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode_node(&mut bytes, &self.tree, self.root);
        encode_occupancy(&mut bytes, &self.occupancy);
        encode_openings(&mut bytes, &self.openings);
        encode_mesh(&mut bytes, &self.mesh);
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl GeneratedBuilding {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.walls.len() as u32).to_le_bytes());
        for &wall in &self.walls {
            encode_node(&mut bytes, &self.tree, wall);
        }
        encode_occupancy(&mut bytes, &self.occupancy);
        encode_openings(&mut bytes, &self.openings);
        encode_roof(&mut bytes, &self.roof);
        encode_mesh(&mut bytes, &self.mesh);
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
