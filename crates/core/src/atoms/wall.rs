//! Engineered wall planning: footprint, reserved opening slots, golden split.

use std::collections::BTreeMap;

use crate::footprint::Footprint;
use crate::grid::{dequantize, snap};
use crate::object::GridObject;
use crate::rng::{self, RngStream};
use crate::spec::InvalidSpecError;
use crate::types::{GridPos, ObjectId, ObjectKind, OpeningKind, SlotId};

use super::{DOOR_HEIGHT, DOOR_WIDTH, WINDOW_HEIGHT, WINDOW_SILL_HEIGHT, WINDOW_WIDTH};

const PHI: f64 = 1.618_033_988_749_895;
const GOLDEN_RATIO_VARIATION: f64 = 0.04;

/// Axis a wall runs along. Perimeter walls alternate between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallAxis {
    X,
    Y,
}

/// One opening requested on a wall, with its spec-driven position ratio.
#[derive(Clone, Debug)]
pub struct OpeningRequest {
    pub slot_id: SlotId,
    pub kind: OpeningKind,
    pub ratio: f64,
}

/// A reserved slot resolved to world-frame grid cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotPlan {
    pub slot_id: SlotId,
    pub kind: OpeningKind,
    pub origin: GridPos,
    pub extent: (i32, i32, i32),
    /// Height of the slot base above the wall base, in grid units.
    pub sill_units: i32,
}

impl SlotPlan {
    pub fn footprint(&self) -> Footprint {
        Footprint::cuboid(self.origin, self.extent)
    }
}

/// A wall ready for placement: the composite object plus its slot plans in
/// declaration order.
#[derive(Clone, Debug)]
pub struct WallPlan {
    pub object: GridObject,
    pub slots: Vec<SlotPlan>,
}

fn opening_dims(kind: OpeningKind) -> (i32, i32, i32) {
    match kind {
        OpeningKind::Door => (snap(DOOR_WIDTH), snap(DOOR_HEIGHT), 0),
        OpeningKind::Window => (snap(WINDOW_WIDTH), snap(WINDOW_HEIGHT), snap(WINDOW_SILL_HEIGHT)),
    }
}

fn offset_along(axis: WallAxis, origin: GridPos, along: i32, up: i32) -> GridPos {
    match axis {
        WallAxis::X => origin.offset(along, 0, up),
        WallAxis::Y => origin.offset(0, along, up),
    }
}

fn extent_along(axis: WallAxis, width: i32, height: i32) -> (i32, i32, i32) {
    match axis {
        WallAxis::X => (width, 1, height),
        WallAxis::Y => (1, width, height),
    }
}

/// Split the wall length at the golden ratio with a slight deterministic
/// variation, snapped back onto the grid.
fn golden_split_units(length_units: i32, stream: &mut RngStream) -> i32 {
    let length_m = dequantize(length_units);
    let split = length_m / PHI;
    let variation = (stream.next_f64() - 0.5) * GOLDEN_RATIO_VARIATION * length_m;
    snap(split + variation)
}

/// Plan a wall composite: full cuboid footprint plus reserved slots.
///
/// Declared openings place their slots at the requested ratio along the wall
/// length. A wall with no declared openings receives one auto window slot at
/// a golden split of its length (drawn from `[wall_id, "wall_slots"]`) when
/// the default window fits; shorter or lower walls stay solid.
pub fn plan_wall(
    id: &ObjectId,
    origin: GridPos,
    axis: WallAxis,
    length_units: i32,
    height_units: i32,
    openings: &[OpeningRequest],
    root_seed: u64,
) -> Result<WallPlan, InvalidSpecError> {
    let footprint = Footprint::cuboid(origin, extent_along(axis, length_units, height_units));

    let mut slots = Vec::new();
    if openings.is_empty() {
        let (width, height, sill) = opening_dims(OpeningKind::Window);
        if length_units >= width + 2 && height_units >= sill + height {
            let mut stream = rng::derive(root_seed, &[id.as_str(), "wall_slots"]);
            let center = golden_split_units(length_units, &mut stream);
            let along = (center - width / 2).clamp(1, length_units - width - 1);
            slots.push(SlotPlan {
                slot_id: SlotId::new("main_opening"),
                kind: OpeningKind::Window,
                origin: offset_along(axis, origin, along, sill),
                extent: extent_along(axis, width, height),
                sill_units: sill,
            });
        }
    } else {
        for request in openings {
            let (width, height, sill) = opening_dims(request.kind);
            let center = (request.ratio * f64::from(length_units)).round() as i32;
            let max_along = length_units - width;
            let along = if max_along > 0 { (center - width / 2).clamp(0, max_along) } else { 0 };
            slots.push(SlotPlan {
                slot_id: request.slot_id.clone(),
                kind: request.kind,
                origin: offset_along(axis, origin, along, sill),
                extent: extent_along(axis, width, height),
                sill_units: sill,
            });
        }
    }

    let reserved: BTreeMap<SlotId, Footprint> =
        slots.iter().map(|slot| (slot.slot_id.clone(), slot.footprint())).collect();
    let object = GridObject::new(id.clone(), id.as_str(), ObjectKind::Wall, footprint, reserved)?;
    Ok(WallPlan { object, slots })
}
