//! Build-request orchestration: wall layout, opening slots, placement,
//! manifold gating.
//!
//! Creation order is fixed by the build request — walls in index order,
//! openings in declaration order — so output never depends on incidental
//! iteration order. Each request gets its own occupancy map and composition
//! tree; nothing is shared between build requests.

use std::fmt;

use crate::atoms::{self, OpeningRequest, WallAxis, build_opening, plan_wall};
use crate::compose::{CompositionError, CompositionTree, NodeId};
use crate::grid::{InvalidCoordinateError, dequantize, quantize_len, snap};
use crate::manifold::{self, NonManifoldError};
use crate::occupancy::{CollisionError, SceneOccupancy};
use crate::spec::{BuildingSpec, InvalidSpecError, WallSpec};
use crate::types::{GridPos, ObjectId, OpeningKind, SlotId};

use super::mesh::{MeshReport, emit_counts};
use super::model::{GeneratedBuilding, GeneratedWall, PlacedOpening};
use super::roof::build_roof;

/// Narrowest buildable span: three cells, so the two long walls and the side
/// walls between them never alias.
const MIN_SPAN_UNITS: i32 = 3;

/// Geometry kept for offline inspection when the manifold gate fails.
#[derive(Debug)]
pub enum PartialOutput {
    Wall(Box<GeneratedWall>),
    Building(Box<GeneratedBuilding>),
}

/// Any failure of a build request. The request aborts as a whole; no partial
/// occupancy state is observable afterwards.
#[derive(Debug)]
pub enum BuildError {
    InvalidCoordinate(InvalidCoordinateError),
    InvalidSpec(InvalidSpecError),
    Collision(CollisionError),
    Composition(CompositionError),
    /// The topology gate failed after geometry emission; the generated data
    /// rides along for inspection instead of being discarded.
    NonManifold { error: NonManifoldError, partial: PartialOutput },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate(error) => write!(f, "invalid coordinate: {error}"),
            Self::InvalidSpec(error) => write!(f, "invalid specification: {error}"),
            Self::Collision(error) => write!(f, "collision: {error}"),
            Self::Composition(error) => write!(f, "composition: {error}"),
            Self::NonManifold { error, .. } => write!(f, "non-manifold geometry: {error}"),
        }
    }
}

impl From<InvalidCoordinateError> for BuildError {
    fn from(error: InvalidCoordinateError) -> Self {
        Self::InvalidCoordinate(error)
    }
}

impl From<InvalidSpecError> for BuildError {
    fn from(error: InvalidSpecError) -> Self {
        Self::InvalidSpec(error)
    }
}

impl From<CollisionError> for BuildError {
    fn from(error: CollisionError) -> Self {
        Self::Collision(error)
    }
}

impl From<CompositionError> for BuildError {
    fn from(error: CompositionError) -> Self {
        Self::Composition(error)
    }
}

fn slot_prefix(kind: OpeningKind) -> &'static str {
    match kind {
        OpeningKind::Door => "door",
        OpeningKind::Window => "window",
    }
}

fn check_mesh(mesh: &MeshReport) -> Result<(), NonManifoldError> {
    for report in &mesh.solids {
        manifold::validate(&report.solid, report.counts)?;
    }
    Ok(())
}

/// Attach every planned opening of one wall, recording the placements.
fn fill_slots(
    root_seed: u64,
    wall_id: &ObjectId,
    slots: &[atoms::SlotPlan],
    tree: &mut CompositionTree,
    root: NodeId,
    openings: &mut Vec<PlacedOpening>,
) -> Result<(), BuildError> {
    for slot in slots {
        let (child, params) = build_opening(root_seed, wall_id, slot)?;
        let object = child.id().clone();
        let node = tree.attach(root, slot.slot_id.clone(), child)?;
        openings.push(PlacedOpening {
            wall: wall_id.clone(),
            slot: slot.slot_id.clone(),
            object,
            node,
            params,
        });
    }
    Ok(())
}

/// Build a single engineered wall with its openings (the `create_wall` path).
pub fn build_wall(spec: &WallSpec) -> Result<GeneratedWall, BuildError> {
    spec.validate()?;
    let length_units = quantize_len("length", spec.length)?;
    let height_units = quantize_len("height", spec.height)?;

    let wall_id = ObjectId::new(spec.name.clone());
    let requests: Vec<OpeningRequest> = spec
        .opening_specs
        .iter()
        .enumerate()
        .map(|(index, opening)| OpeningRequest {
            slot_id: SlotId::new(format!("{}_slot_{index}", slot_prefix(opening.kind))),
            kind: opening.kind,
            ratio: opening.position_ratio,
        })
        .collect();

    let plan = plan_wall(
        &wall_id,
        GridPos::ORIGIN,
        WallAxis::X,
        length_units,
        height_units,
        &requests,
        spec.seed,
    )?;

    let mut occupancy = SceneOccupancy::new();
    occupancy.place(&plan.object)?;

    let mut tree = CompositionTree::new();
    let root = tree.insert_root(plan.object);
    let mut openings = Vec::new();
    fill_slots(spec.seed, &wall_id, &plan.slots, &mut tree, root, &mut openings)?;

    let mesh = emit_counts(&tree, None);
    let wall = GeneratedWall { tree, root, occupancy, openings, mesh };
    match check_mesh(&wall.mesh) {
        Ok(()) => Ok(wall),
        Err(error) => {
            Err(BuildError::NonManifold { error, partial: PartialOutput::Wall(Box::new(wall)) })
        }
    }
}

struct WallFrame {
    id: ObjectId,
    origin: GridPos,
    axis: WallAxis,
    length_units: i32,
}

pub struct BuildingGenerator {
    spec: BuildingSpec,
}

impl BuildingGenerator {
    pub fn new(spec: BuildingSpec) -> Self {
        Self { spec }
    }

    pub fn generate(&self) -> Result<GeneratedBuilding, BuildError> {
        self.spec.validate()?;
        let width_units = quantize_len("width", self.spec.width)?;
        let depth_units = quantize_len("depth", self.spec.depth)?;
        let story_units = snap(atoms::STORY_HEIGHT);
        if width_units < MIN_SPAN_UNITS {
            return Err(InvalidSpecError::SpanTooNarrow {
                field: "width",
                value: self.spec.width,
                minimum: dequantize(MIN_SPAN_UNITS),
            }
            .into());
        }
        if depth_units < MIN_SPAN_UNITS {
            return Err(InvalidSpecError::SpanTooNarrow {
                field: "depth",
                value: self.spec.depth,
                minimum: dequantize(MIN_SPAN_UNITS),
            }
            .into());
        }

        // Perimeter layout: the long south/north walls own the corner cells,
        // the side walls span the cells between them.
        let mut frames = Vec::new();
        for floor in 0..self.spec.floors as i32 {
            let z = floor * story_units;
            let floor_frames = [
                (GridPos { x: 0, y: 0, z }, WallAxis::X, width_units),
                (GridPos { x: 0, y: depth_units - 1, z }, WallAxis::X, width_units),
                (GridPos { x: 0, y: 1, z }, WallAxis::Y, depth_units - 2),
                (GridPos { x: width_units - 1, y: 1, z }, WallAxis::Y, depth_units - 2),
            ];
            for (origin, axis, length_units) in floor_frames {
                let id = ObjectId::new(format!("wall_{}", frames.len()));
                frames.push(WallFrame { id, origin, axis, length_units });
            }
        }

        let mut requests: Vec<Vec<OpeningRequest>> = vec![Vec::new(); frames.len()];
        for (index, opening) in self.spec.opening_specs.iter().enumerate() {
            let Some(frame_index) =
                frames.iter().position(|frame| frame.id.as_str() == opening.slot_owner)
            else {
                return Err(InvalidSpecError::UnknownSlotOwner {
                    owner: opening.slot_owner.clone(),
                }
                .into());
            };
            requests[frame_index].push(OpeningRequest {
                slot_id: SlotId::new(format!("{}_slot_{index}", slot_prefix(opening.kind))),
                kind: opening.kind,
                ratio: opening.position_ratio,
            });
        }

        let mut occupancy = SceneOccupancy::new();
        let mut tree = CompositionTree::new();
        let mut walls = Vec::new();
        let mut openings = Vec::new();
        for (frame, wall_requests) in frames.iter().zip(&requests) {
            let plan = plan_wall(
                &frame.id,
                frame.origin,
                frame.axis,
                frame.length_units,
                story_units,
                wall_requests,
                self.spec.seed,
            )?;
            occupancy.place(&plan.object)?;
            let root = tree.insert_root(plan.object);
            walls.push(root);
            fill_slots(self.spec.seed, &frame.id, &plan.slots, &mut tree, root, &mut openings)?;
        }

        let roof = build_roof(
            0.0,
            0.0,
            dequantize(width_units),
            dequantize(depth_units),
            dequantize(story_units * self.spec.floors as i32),
            self.spec.roof_type,
        );
        let mesh = emit_counts(&tree, Some(&roof));
        let building = GeneratedBuilding { tree, walls, occupancy, openings, roof, mesh };
        match check_mesh(&building.mesh) {
            Ok(()) => Ok(building),
            Err(error) => Err(BuildError::NonManifold {
                error,
                partial: PartialOutput::Building(Box::new(building)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::footprint::Footprint;
    use crate::object::GridObject;
    use crate::spec::OpeningSpec;
    use crate::types::{ObjectKind, RoofType};

    fn scenario_wall_spec(seed: u64) -> WallSpec {
        WallSpec {
            name: "wall_0".to_string(),
            length: 5.0,
            height: 3.0,
            seed,
            opening_specs: vec![OpeningSpec {
                kind: OpeningKind::Door,
                position_ratio: 0.5,
                slot_owner: "wall_0".to_string(),
            }],
        }
    }

    fn small_building_spec(seed: u64) -> BuildingSpec {
        BuildingSpec {
            width: 5.0,
            depth: 4.0,
            floors: 1,
            seed,
            roof_type: RoofType::Gabled,
            opening_specs: vec![OpeningSpec {
                kind: OpeningKind::Door,
                position_ratio: 0.5,
                slot_owner: "wall_0".to_string(),
            }],
        }
    }

    #[test]
    fn single_wall_scenario_yields_one_occupant_and_one_attached_door() {
        let generated = build_wall(&scenario_wall_spec(12_345)).expect("scenario wall builds");

        let occupants = generated.occupancy.occupants();
        assert_eq!(occupants.len(), 1);
        assert!(occupants.contains(&ObjectId::new("wall_0")));

        assert_eq!(generated.tree.len(), 2);
        let root = generated.tree.node(generated.root);
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].0, SlotId::new("door_slot_0"));
        assert_eq!(generated.openings.len(), 1);

        // 5 m wall, door centered at ratio 0.5: cells x 8..12, z 0..8.
        let expected = Footprint::cuboid(GridPos { x: 8, y: 0, z: 0 }, (4, 1, 8));
        assert_eq!(root.object().reserved(&SlotId::new("door_slot_0")), Some(&expected));
    }

    #[test]
    fn rerunning_the_same_seed_is_byte_identical() {
        let first = build_wall(&scenario_wall_spec(12_345)).expect("wall builds");
        let second = build_wall(&scenario_wall_spec(12_345)).expect("wall builds");
        assert_eq!(first.canonical_bytes(), second.canonical_bytes());
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn different_seed_changes_the_door_sub_placement_but_not_the_slot() {
        let first = build_wall(&scenario_wall_spec(12_345)).expect("wall builds");
        let second = build_wall(&scenario_wall_spec(54_321)).expect("wall builds");

        // Slot position is spec-driven, so footprints and occupancy agree.
        assert_eq!(
            first.tree.node(first.root).object().reserved_slots(),
            second.tree.node(second.root).object().reserved_slots(),
        );
        assert_eq!(first.occupancy, second.occupancy);

        // The RNG-derived door parameters come from a different stream.
        assert_ne!(first.openings[0].params, second.openings[0].params);
    }

    #[test]
    fn composed_children_are_never_placed_and_collide_if_tried() {
        let mut generated = build_wall(&scenario_wall_spec(12_345)).expect("wall builds");

        let slot_region = generated
            .tree
            .node(generated.root)
            .object()
            .reserved(&SlotId::new("door_slot_0"))
            .expect("slot exists")
            .clone();
        let rogue = GridObject::leaf(
            ObjectId::new("rogue_door"),
            "door",
            ObjectKind::Opening(OpeningKind::Door),
            slot_region,
        )
        .expect("rogue door validates");

        let err = generated.occupancy.place(&rogue).expect_err("cells belong to the wall");
        assert_eq!(err.existing, ObjectId::new("wall_0"));
        assert_eq!(err.incoming, ObjectId::new("rogue_door"));
    }

    #[test]
    fn building_places_four_walls_per_floor_with_openings_filled() {
        let generated =
            BuildingGenerator::new(small_building_spec(2_024)).generate().expect("building builds");

        assert_eq!(generated.walls.len(), 4);
        assert_eq!(generated.occupancy.occupants().len(), 4);

        // wall_0 carries the declared door; the other three walls are long
        // enough to receive auto window slots.
        assert_eq!(generated.openings.len(), 4);
        assert_eq!(generated.openings[0].wall, ObjectId::new("wall_0"));
        assert_eq!(generated.openings[0].slot, SlotId::new("door_slot_0"));
        for placed in &generated.openings[1..] {
            assert_eq!(placed.slot, SlotId::new("main_opening"));
        }

        // Roof counts are part of the emitted report.
        assert!(generated.mesh.solids.iter().any(|solid| solid.solid == "roof"));
    }

    #[test]
    fn multi_floor_buildings_stack_without_collisions() {
        let spec = BuildingSpec { floors: 3, ..small_building_spec(7) };
        let generated = BuildingGenerator::new(spec).generate().expect("building builds");
        assert_eq!(generated.walls.len(), 12);
        assert_eq!(generated.occupancy.occupants().len(), 12);
    }

    #[test]
    fn unknown_slot_owner_is_rejected() {
        let mut spec = small_building_spec(1);
        spec.opening_specs[0].slot_owner = "wall_99".to_string();
        let err = BuildingGenerator::new(spec).generate().expect_err("unknown owner fails");
        assert!(matches!(
            err,
            BuildError::InvalidSpec(InvalidSpecError::UnknownSlotOwner { .. })
        ));
    }

    #[test]
    fn undersized_spans_are_rejected() {
        let spec = BuildingSpec { width: 0.3, ..small_building_spec(1) };
        let err = BuildingGenerator::new(spec).generate().expect_err("narrow span fails");
        assert!(matches!(
            err,
            BuildError::InvalidSpec(InvalidSpecError::SpanTooNarrow { field: "width", .. })
        ));
    }

    #[test]
    fn nan_dimensions_fail_validation_before_quantization() {
        let spec = WallSpec {
            name: "wall_0".to_string(),
            length: f64::NAN,
            height: 3.0,
            seed: 1,
            opening_specs: Vec::new(),
        };
        let err = build_wall(&spec).expect_err("NaN length fails");
        assert!(matches!(err, BuildError::InvalidSpec(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generation_is_deterministic_across_reruns(
            seed in any::<u64>(),
            width in 2.0..12.0_f64,
            depth in 2.0..12.0_f64,
            floors in 1_u32..=3,
            roof_selector in 0_u8..=3,
        ) {
            let roof_type = match roof_selector {
                0 => RoofType::Flat,
                1 => RoofType::Gabled,
                2 => RoofType::Hip,
                _ => RoofType::Shed,
            };
            let spec = BuildingSpec {
                width,
                depth,
                floors,
                seed,
                roof_type,
                opening_specs: Vec::new(),
            };

            let first = BuildingGenerator::new(spec.clone())
                .generate()
                .expect("valid spec generates");
            let second = BuildingGenerator::new(spec)
                .generate()
                .expect("valid spec generates");
            prop_assert_eq!(first.canonical_bytes(), second.canonical_bytes());
        }
    }
}
