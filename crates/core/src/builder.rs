//! Building generation domain split into coherent submodules.

pub mod model;
pub mod roof;

mod generator;
mod mesh;

use crate::spec::BuildingSpec;

pub use generator::{BuildError, BuildingGenerator, PartialOutput, build_wall};
pub use mesh::{MeshReport, SolidReport};
pub use model::{GeneratedBuilding, GeneratedWall, PlacedOpening};
pub use roof::{DEFAULT_ROOF_PITCH, RoofFace, RoofGeometry, RoofTrig, build_roof, roof_trig};

/// Generate a full building from its specification.
pub fn generate_building(spec: &BuildingSpec) -> Result<GeneratedBuilding, BuildError> {
    BuildingGenerator::new(spec.clone()).generate()
}

#[cfg(test)]
mod tests {
    use super::{BuildingGenerator, generate_building};
    use crate::spec::BuildingSpec;
    use crate::types::RoofType;

    #[test]
    fn generate_building_matches_generator_output() {
        let spec = BuildingSpec {
            width: 6.0,
            depth: 4.5,
            floors: 2,
            seed: 123,
            roof_type: RoofType::Hip,
            opening_specs: Vec::new(),
        };

        let from_helper = generate_building(&spec).expect("spec generates");
        let from_generator =
            BuildingGenerator::new(spec).generate().expect("spec generates");

        assert_eq!(from_helper.canonical_bytes(), from_generator.canonical_bytes());
    }
}
