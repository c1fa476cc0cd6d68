//! Immutable grid-cell sets describing the space an object occupies.

use std::collections::BTreeSet;

use crate::types::GridPos;

/// The complete set of cells an object occupies. Immutable once computed;
/// iteration order is the cells' natural order, so encodings are stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footprint {
    cells: BTreeSet<GridPos>,
}

impl Footprint {
    pub fn from_cells(cells: impl IntoIterator<Item = GridPos>) -> Self {
        Self { cells: cells.into_iter().collect() }
    }

    /// Every interior cell of a box spanning `extent` cells from `origin`,
    /// not just its boundary.
    pub fn cuboid(origin: GridPos, extent: (i32, i32, i32)) -> Self {
        let (width, depth, height) = extent;
        debug_assert!(width > 0 && depth > 0 && height > 0);
        let mut cells = BTreeSet::new();
        for dx in 0..width {
            for dy in 0..depth {
                for dz in 0..height {
                    cells.insert(origin.offset(dx, dy, dz));
                }
            }
        }
        Self { cells }
    }

    /// The same shape shifted by `delta`, for mapping a local-frame footprint
    /// into a parent's placement frame.
    pub fn translated(&self, delta: GridPos) -> Self {
        Self { cells: self.cells.iter().map(|cell| cell.offset(delta.x, delta.y, delta.z)).collect() }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn is_subset_of(&self, other: &Footprint) -> bool {
        self.cells.is_subset(&other.cells)
    }

    pub fn is_disjoint_from(&self, other: &Footprint) -> bool {
        self.cells.is_disjoint(&other.cells)
    }

    pub fn iter(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.cells.iter().copied()
    }
}
