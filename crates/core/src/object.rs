//! Grid-placed entities and the composite capability surface.

use std::collections::BTreeMap;

use crate::footprint::Footprint;
use crate::spec::InvalidSpecError;
use crate::types::{ObjectId, ObjectKind, SlotId};

/// A named entity occupying grid cells, optionally reserving sub-regions for
/// composed children. Immutable after construction; a change means rebuilding
/// the composition subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridObject {
    id: ObjectId,
    name: String,
    kind: ObjectKind,
    footprint: Footprint,
    reserved: BTreeMap<SlotId, Footprint>,
}

impl GridObject {
    /// Validates the composite invariants: a placed object has a non-empty
    /// footprint, every reserved region lies inside it, and reserved regions
    /// do not overlap each other.
    pub fn new(
        id: ObjectId,
        name: impl Into<String>,
        kind: ObjectKind,
        footprint: Footprint,
        reserved: BTreeMap<SlotId, Footprint>,
    ) -> Result<Self, InvalidSpecError> {
        if footprint.is_empty() {
            return Err(InvalidSpecError::EmptyFootprint { id });
        }
        for (slot, region) in &reserved {
            if !region.is_subset_of(&footprint) {
                return Err(InvalidSpecError::ReservedOutsideFootprint { id, slot: slot.clone() });
            }
        }
        let slots: Vec<&SlotId> = reserved.keys().collect();
        for (index, first) in slots.iter().enumerate() {
            for second in &slots[index + 1..] {
                if !reserved[*first].is_disjoint_from(&reserved[*second]) {
                    return Err(InvalidSpecError::OverlappingReservedSlots {
                        id,
                        first: (*first).clone(),
                        second: (*second).clone(),
                    });
                }
            }
        }
        Ok(Self { id, name: name.into(), kind, footprint, reserved })
    }

    /// Convenience constructor for leaf objects with no reserved slots.
    pub fn leaf(
        id: ObjectId,
        name: impl Into<String>,
        kind: ObjectKind,
        footprint: Footprint,
    ) -> Result<Self, InvalidSpecError> {
        Self::new(id, name, kind, footprint, BTreeMap::new())
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn reserved_slots(&self) -> &BTreeMap<SlotId, Footprint> {
        &self.reserved
    }

    pub fn reserved(&self, slot: &SlotId) -> Option<&Footprint> {
        self.reserved.get(slot)
    }

    /// An object with reserved entries is a composite; its footprint already
    /// contains every slot carved into it.
    pub fn is_composite(&self) -> bool {
        !self.reserved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GridPos, OpeningKind};

    fn slot(name: &str, origin: GridPos) -> (SlotId, Footprint) {
        (SlotId::new(name), Footprint::cuboid(origin, (2, 1, 2)))
    }

    #[test]
    fn composite_with_contained_slots_is_accepted() {
        let footprint = Footprint::cuboid(GridPos::ORIGIN, (10, 1, 8));
        let reserved = BTreeMap::from([slot("door_slot_0", GridPos { x: 2, y: 0, z: 0 })]);
        let wall = GridObject::new(
            ObjectId::new("wall_0"),
            "wall",
            ObjectKind::Wall,
            footprint,
            reserved,
        )
        .expect("contained slot should validate");
        assert!(wall.is_composite());
        assert_eq!(wall.reserved(&SlotId::new("door_slot_0")).map(Footprint::len), Some(4));
    }

    #[test]
    fn empty_footprint_is_rejected() {
        let err = GridObject::leaf(
            ObjectId::new("ghost"),
            "ghost",
            ObjectKind::Opening(OpeningKind::Door),
            Footprint::from_cells([]),
        )
        .expect_err("empty footprint must fail");
        assert_eq!(err, InvalidSpecError::EmptyFootprint { id: ObjectId::new("ghost") });
    }

    #[test]
    fn reserved_region_outside_footprint_is_rejected() {
        let footprint = Footprint::cuboid(GridPos::ORIGIN, (4, 1, 4));
        let reserved = BTreeMap::from([slot("window_slot_0", GridPos { x: 3, y: 0, z: 3 })]);
        let err = GridObject::new(
            ObjectId::new("wall_0"),
            "wall",
            ObjectKind::Wall,
            footprint,
            reserved,
        )
        .expect_err("slot leaking past the footprint must fail");
        assert!(matches!(err, InvalidSpecError::ReservedOutsideFootprint { .. }));
    }

    #[test]
    fn overlapping_reserved_regions_are_rejected() {
        let footprint = Footprint::cuboid(GridPos::ORIGIN, (10, 1, 8));
        let reserved = BTreeMap::from([
            slot("a", GridPos { x: 2, y: 0, z: 0 }),
            slot("b", GridPos { x: 3, y: 0, z: 1 }),
        ]);
        let err = GridObject::new(
            ObjectId::new("wall_0"),
            "wall",
            ObjectKind::Wall,
            footprint,
            reserved,
        )
        .expect_err("overlapping slots must fail");
        assert!(matches!(err, InvalidSpecError::OverlappingReservedSlots { .. }));
    }
}
