//! Arena-backed composition tree and containment-aware slot resolution.
//!
//! Containment is resolved entirely in this tree: attaching a child never
//! touches the occupancy map, so an opening cut into a wall can never be
//! mistaken for a colliding placement. Parent/child edges are arena keys,
//! never owning references.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::object::GridObject;
use crate::types::{ObjectId, SlotId};

new_key_type! {
    pub struct NodeId;
}

/// A composition authoring error. Fatal; never downgraded to a partial
/// placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositionError {
    UnknownSlot {
        parent: ObjectId,
        slot: SlotId,
    },
    /// The child must fill the reserved region exactly; partial coverage and
    /// overflow both fail rather than silently cropping geometry.
    FootprintMismatch {
        parent: ObjectId,
        slot: SlotId,
        expected_cells: usize,
        actual_cells: usize,
    },
    SlotAlreadyFilled {
        parent: ObjectId,
        slot: SlotId,
        existing: ObjectId,
    },
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlot { parent, slot } => {
                write!(f, "object '{parent}' declares no slot '{slot}'")
            }
            Self::FootprintMismatch { parent, slot, expected_cells, actual_cells } => {
                write!(
                    f,
                    "child does not exactly fill slot '{slot}' of '{parent}': reserved {expected_cells} cells, child covers {actual_cells}"
                )
            }
            Self::SlotAlreadyFilled { parent, slot, existing } => {
                write!(f, "slot '{slot}' of '{parent}' is already filled by '{existing}'")
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct CompositionNode {
    object: GridObject,
    parent: Option<NodeId>,
    children: Vec<(SlotId, NodeId)>,
}

impl CompositionNode {
    pub fn object(&self) -> &GridObject {
        &self.object
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attach order, each tagged with the slot it fills.
    pub fn children(&self) -> &[(SlotId, NodeId)] {
        &self.children
    }
}

#[derive(Clone, Debug, Default)]
pub struct CompositionTree {
    nodes: SlotMap<NodeId, CompositionNode>,
    roots: Vec<NodeId>,
}

impl CompositionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a top-level object (one that will also be placed into the
    /// occupancy map by the caller).
    pub fn insert_root(&mut self, object: GridObject) -> NodeId {
        let node = self.nodes.insert(CompositionNode { object, parent: None, children: Vec::new() });
        self.roots.push(node);
        node
    }

    /// Resolve `child` against `parent`'s reserved region for `slot_id` and
    /// link it into the tree. The occupancy map is deliberately not involved:
    /// containment happens before collision detection can ever see the child.
    pub fn attach(
        &mut self,
        parent: NodeId,
        slot_id: SlotId,
        child: GridObject,
    ) -> Result<NodeId, CompositionError> {
        let parent_node = &self.nodes[parent];
        let parent_id = parent_node.object.id().clone();

        let Some(expected) = parent_node.object.reserved(&slot_id) else {
            return Err(CompositionError::UnknownSlot { parent: parent_id, slot: slot_id });
        };
        if child.footprint() != expected {
            return Err(CompositionError::FootprintMismatch {
                parent: parent_id,
                slot: slot_id,
                expected_cells: expected.len(),
                actual_cells: child.footprint().len(),
            });
        }
        if let Some((_, existing)) = parent_node.children.iter().find(|(slot, _)| *slot == slot_id)
        {
            return Err(CompositionError::SlotAlreadyFilled {
                parent: parent_id,
                slot: slot_id,
                existing: self.nodes[*existing].object.id().clone(),
            });
        }

        let child_node = self.nodes.insert(CompositionNode {
            object: child,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push((slot_id, child_node));
        Ok(child_node)
    }

    pub fn node(&self, id: NodeId) -> &CompositionNode {
        &self.nodes[id]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
