//! Topology-count emission for generated solids.
//!
//! Stands in for the external mesh emitter at the boundary: walks the
//! finalized composition tree (and the roof, when present) and reports the
//! vertex/edge/face counts of every solid that would be emitted. The core
//! never produces vertex buffers.

use crate::compose::CompositionTree;
use crate::manifold::SolidCounts;
use crate::types::{ObjectKind, OpeningKind};

use super::roof::RoofGeometry;

/// Counts for one named solid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolidReport {
    pub solid: String,
    pub counts: SolidCounts,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshReport {
    pub solids: Vec<SolidReport>,
}

impl MeshReport {
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
}

fn cuboid(name: impl Into<String>) -> SolidReport {
    SolidReport { solid: name.into(), counts: SolidCounts::CUBOID }
}

/// Emit counts for every solid in the tree, root-first, children in attach
/// order, then the roof.
pub fn emit_counts(tree: &CompositionTree, roof: Option<&RoofGeometry>) -> MeshReport {
    let mut solids = Vec::new();

    for &root in tree.roots() {
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            let node = tree.node(node_id);
            let object = node.object();
            match object.kind() {
                ObjectKind::Wall => solids.push(cuboid(object.id().as_str())),
                ObjectKind::Opening(OpeningKind::Door) => {
                    for part in ["frame_jamb_left", "frame_jamb_right", "frame_head", "door_leaf"]
                    {
                        solids.push(cuboid(format!("{}/{part}", object.id())));
                    }
                }
                ObjectKind::Opening(OpeningKind::Window) => {
                    solids.push(cuboid(format!("{}/frame", object.id())));
                }
            }
            for (_, child) in node.children().iter().rev() {
                stack.push(*child);
            }
        }
    }

    if let Some(roof) = roof {
        solids.push(SolidReport { solid: "roof".to_string(), counts: roof.solid_counts() });
    }

    MeshReport { solids }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::footprint::Footprint;
    use crate::object::GridObject;
    use crate::types::{GridPos, ObjectId, SlotId};

    #[test]
    fn wall_with_door_emits_the_wall_box_and_four_door_parts() {
        let slot_region = Footprint::cuboid(GridPos { x: 8, y: 0, z: 0 }, (4, 1, 8));
        let wall = GridObject::new(
            ObjectId::new("wall_0"),
            "wall_0",
            ObjectKind::Wall,
            Footprint::cuboid(GridPos::ORIGIN, (20, 1, 12)),
            BTreeMap::from([(SlotId::new("door_slot_0"), slot_region.clone())]),
        )
        .expect("wall should validate");
        let door = GridObject::leaf(
            ObjectId::new("wall_0/door_slot_0"),
            "door",
            ObjectKind::Opening(OpeningKind::Door),
            slot_region,
        )
        .expect("door should validate");

        let mut tree = CompositionTree::new();
        let root = tree.insert_root(wall);
        tree.attach(root, SlotId::new("door_slot_0"), door).expect("door should attach");

        let report = emit_counts(&tree, None);
        assert_eq!(report.len(), 5);
        assert_eq!(report.solids[0].solid, "wall_0");
        assert_eq!(report.solids[1].solid, "wall_0/door_slot_0/frame_jamb_left");
        assert_eq!(report.solids[4].solid, "wall_0/door_slot_0/door_leaf");
        assert!(report.solids.iter().all(|s| s.counts == SolidCounts::CUBOID));
    }
}
