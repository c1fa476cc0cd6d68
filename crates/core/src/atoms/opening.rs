//! Door and window children: exact-fit footprints plus local anatomy.
//!
//! A child's footprint always equals its reserved slot region; the RNG drives
//! only local geometry parameters (swing, hardware placement), never the
//! footprint itself.

use serde::Serialize;

use crate::grid::dequantize;
use crate::object::GridObject;
use crate::rng;
use crate::spec::InvalidSpecError;
use crate::types::{ObjectId, ObjectKind, OpeningKind};

use super::wall::SlotPlan;

const FRAME_THICKNESS: f64 = 0.05;
const LEAF_THICKNESS: f64 = 0.05;
const FRAME_DEPTH: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DoorSwing {
    InwardLeft,
    InwardRight,
    OutwardLeft,
    OutwardRight,
}

const SWINGS: [DoorSwing; 4] =
    [DoorSwing::InwardLeft, DoorSwing::InwardRight, DoorSwing::OutwardLeft, DoorSwing::OutwardRight];

impl DoorSwing {
    pub fn code(self) -> u8 {
        match self {
            Self::InwardLeft => 0,
            Self::InwardRight => 1,
            Self::OutwardLeft => 2,
            Self::OutwardRight => 3,
        }
    }
}

/// Local geometry parameters carried for mesh emission.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum OpeningParams {
    Door { swing: DoorSwing, knob_height_m: f64 },
    Window { sill_m: f64, frame_inset_m: f64 },
}

/// One box of the door anatomy, in the door's local meter frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorPart {
    pub name: &'static str,
    pub origin: [f64; 3],
    pub size: [f64; 3],
}

/// The four-part anatomy: two vertical jambs, the head lintel, and the leaf.
pub fn door_parts(width_m: f64, height_m: f64) -> [DoorPart; 4] {
    [
        DoorPart {
            name: "frame_jamb_left",
            origin: [0.0, 0.0, 0.0],
            size: [FRAME_THICKNESS, FRAME_DEPTH, height_m],
        },
        DoorPart {
            name: "frame_jamb_right",
            origin: [width_m - FRAME_THICKNESS, 0.0, 0.0],
            size: [FRAME_THICKNESS, FRAME_DEPTH, height_m],
        },
        DoorPart {
            name: "frame_head",
            origin: [0.0, 0.0, height_m - FRAME_THICKNESS],
            size: [width_m, FRAME_DEPTH, FRAME_THICKNESS],
        },
        DoorPart {
            name: "door_leaf",
            origin: [FRAME_THICKNESS, FRAME_DEPTH / 2.0, FRAME_THICKNESS],
            size: [
                width_m - 2.0 * FRAME_THICKNESS,
                LEAF_THICKNESS,
                height_m - 2.0 * FRAME_THICKNESS,
            ],
        },
    ]
}

/// Build the child object filling `slot`, drawing its local parameters from
/// the stream keyed by `[wall_id, slot_id]`.
pub fn build_opening(
    root_seed: u64,
    wall: &ObjectId,
    slot: &SlotPlan,
) -> Result<(GridObject, OpeningParams), InvalidSpecError> {
    let mut stream = rng::derive(root_seed, &[wall.as_str(), slot.slot_id.as_str()]);

    let params = match slot.kind {
        OpeningKind::Door => OpeningParams::Door {
            swing: SWINGS[stream.usize_in(0, SWINGS.len() - 1)],
            knob_height_m: 0.9 + stream.next_f64() * 0.2,
        },
        OpeningKind::Window => OpeningParams::Window {
            sill_m: dequantize(slot.sill_units),
            frame_inset_m: 0.02 + stream.next_f64() * 0.03,
        },
    };

    let name = match slot.kind {
        OpeningKind::Door => "door",
        OpeningKind::Window => "window",
    };
    let id = ObjectId::new(format!("{}/{}", wall, slot.slot_id));
    let object =
        GridObject::leaf(id, name, ObjectKind::Opening(slot.kind), slot.footprint())?;
    Ok((object, params))
}
