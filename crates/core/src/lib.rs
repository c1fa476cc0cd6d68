pub mod atoms;
pub mod builder;
pub mod compose;
pub mod footprint;
pub mod grid;
pub mod manifold;
pub mod object;
pub mod occupancy;
pub mod rng;
pub mod spec;
pub mod types;

pub use builder::{
    BuildError, BuildingGenerator, GeneratedBuilding, GeneratedWall, PartialOutput, PlacedOpening,
    build_wall, generate_building,
};
pub use compose::{CompositionError, CompositionNode, CompositionTree, NodeId};
pub use footprint::Footprint;
pub use grid::{GRID_UNIT, InvalidCoordinateError};
pub use manifold::{NonManifoldError, SolidCounts};
pub use object::GridObject;
pub use occupancy::{CollisionError, SceneOccupancy};
pub use spec::{BuildingSpec, InvalidSpecError, OpeningSpec, WallSpec};
pub use types::*;
