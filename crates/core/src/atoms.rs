//! Architectural atoms: engineered walls and the openings cut into them.

pub mod opening;
pub mod wall;

pub use opening::{DoorPart, DoorSwing, OpeningParams, build_opening, door_parts};
pub use wall::{OpeningRequest, SlotPlan, WallAxis, WallPlan, plan_wall};

/// Story height in meters.
pub const STORY_HEIGHT: f64 = 3.0;

/// Base wall thickness in meters; one grid cell once quantized.
pub const WALL_THICKNESS: f64 = 0.2;

pub const DOOR_WIDTH: f64 = 1.0;
pub const DOOR_HEIGHT: f64 = 2.0;

pub const WINDOW_WIDTH: f64 = 1.0;
pub const WINDOW_HEIGHT: f64 = 1.2;
pub const WINDOW_SILL_HEIGHT: f64 = 1.2;
