//! Authoritative cell-ownership map with all-or-nothing placement.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::object::GridObject;
use crate::types::{GridPos, ObjectId};

/// Two independent top-level objects claimed the same cell. Fatal to the
/// current build request; carries both occupant ids for diagnosis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionError {
    pub cell: GridPos,
    pub existing: ObjectId,
    pub incoming: ObjectId,
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {}, {}) already occupied by '{}', requested by '{}'",
            self.cell.x, self.cell.y, self.cell.z, self.existing, self.incoming
        )
    }
}

/// Map from grid cell to occupying object id. Each cell holds at most one
/// occupant; composed children are never entered here, only their top-level
/// parents. Instances are passed explicitly through the generation call
/// chain; there is no process-wide occupancy state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneOccupancy {
    cells: BTreeMap<GridPos, ObjectId>,
}

impl SceneOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every footprint cell of `object`, or fail without modifying the
    /// map at all. The full footprint is probed before the first write, so a
    /// rejected placement leaves no partial state behind.
    pub fn place(&mut self, object: &GridObject) -> Result<(), CollisionError> {
        for cell in object.footprint().iter() {
            if let Some(existing) = self.cells.get(&cell) {
                if existing != object.id() {
                    return Err(CollisionError {
                        cell,
                        existing: existing.clone(),
                        incoming: object.id().clone(),
                    });
                }
            }
        }
        for cell in object.footprint().iter() {
            self.cells.insert(cell, object.id().clone());
        }
        Ok(())
    }

    /// Clear every cell owned by `id`.
    pub fn remove(&mut self, id: &ObjectId) {
        self.cells.retain(|_, occupant| occupant != id);
    }

    pub fn query(&self, pos: GridPos) -> Option<&ObjectId> {
        self.cells.get(&pos)
    }

    pub fn occupants(&self) -> BTreeSet<&ObjectId> {
        self.cells.values().collect()
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &ObjectId)> + '_ {
        self.cells.iter().map(|(pos, id)| (*pos, id))
    }
}
