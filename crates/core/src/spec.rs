//! Build-request specifications and their validation.
//!
//! These records arrive from the CLI layer as JSON; the core validates value
//! ranges here and leaves file-format concerns to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ObjectId, OpeningKind, RoofType, SlotId};

/// One requested opening on a named wall. `position_ratio` places the slot
/// along the owning wall's length; the slot position is spec-driven, never
/// drawn from the RNG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpeningSpec {
    pub kind: OpeningKind,
    pub position_ratio: f64,
    pub slot_owner: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub width: f64,
    pub depth: f64,
    pub floors: u32,
    pub seed: u64,
    #[serde(default)]
    pub roof_type: RoofType,
    #[serde(default)]
    pub opening_specs: Vec<OpeningSpec>,
}

/// Specification for a single engineered wall (the `create_wall` path).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub name: String,
    pub length: f64,
    pub height: f64,
    pub seed: u64,
    #[serde(default)]
    pub opening_specs: Vec<OpeningSpec>,
}

/// Malformed build input. Never retried; surfaced immediately with the
/// offending value.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidSpecError {
    NonPositiveDimension { field: &'static str, value: f64 },
    SpanTooNarrow { field: &'static str, value: f64, minimum: f64 },
    ZeroFloors,
    PositionRatioOutOfRange { index: usize, value: f64 },
    UnknownSlotOwner { owner: String },
    EmptyFootprint { id: ObjectId },
    ReservedOutsideFootprint { id: ObjectId, slot: SlotId },
    OverlappingReservedSlots { id: ObjectId, first: SlotId, second: SlotId },
}

impl fmt::Display for InvalidSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { field, value } => {
                write!(f, "dimension '{field}' must be positive, got {value}")
            }
            Self::SpanTooNarrow { field, value, minimum } => {
                write!(f, "dimension '{field}' is {value} m, below the {minimum} m minimum span")
            }
            Self::ZeroFloors => write!(f, "a building needs at least one floor"),
            Self::PositionRatioOutOfRange { index, value } => {
                write!(f, "opening {index}: position_ratio {value} is outside [0, 1]")
            }
            Self::UnknownSlotOwner { owner } => {
                write!(f, "opening references unknown wall '{owner}'")
            }
            Self::EmptyFootprint { id } => write!(f, "object '{id}' has an empty footprint"),
            Self::ReservedOutsideFootprint { id, slot } => {
                write!(f, "object '{id}': reserved slot '{slot}' falls outside the footprint")
            }
            Self::OverlappingReservedSlots { id, first, second } => {
                write!(f, "object '{id}': reserved slots '{first}' and '{second}' overlap")
            }
        }
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), InvalidSpecError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(InvalidSpecError::NonPositiveDimension { field, value })
    }
}

fn check_ratios(openings: &[OpeningSpec]) -> Result<(), InvalidSpecError> {
    for (index, opening) in openings.iter().enumerate() {
        if !(0.0..=1.0).contains(&opening.position_ratio) {
            return Err(InvalidSpecError::PositionRatioOutOfRange {
                index,
                value: opening.position_ratio,
            });
        }
    }
    Ok(())
}

impl BuildingSpec {
    pub fn validate(&self) -> Result<(), InvalidSpecError> {
        check_positive("width", self.width)?;
        check_positive("depth", self.depth)?;
        if self.floors == 0 {
            return Err(InvalidSpecError::ZeroFloors);
        }
        check_ratios(&self.opening_specs)
    }
}

impl WallSpec {
    pub fn validate(&self) -> Result<(), InvalidSpecError> {
        check_positive("length", self.length)?;
        check_positive("height", self.height)?;
        check_ratios(&self.opening_specs)?;
        for opening in &self.opening_specs {
            if opening.slot_owner != self.name {
                return Err(InvalidSpecError::UnknownSlotOwner {
                    owner: opening.slot_owner.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door_at(ratio: f64, owner: &str) -> OpeningSpec {
        OpeningSpec { kind: OpeningKind::Door, position_ratio: ratio, slot_owner: owner.to_string() }
    }

    #[test]
    fn well_formed_building_spec_passes() {
        let spec = BuildingSpec {
            width: 5.0,
            depth: 4.0,
            floors: 2,
            seed: 1,
            roof_type: RoofType::Gabled,
            opening_specs: vec![door_at(0.5, "wall_0")],
        };
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let spec = BuildingSpec {
            width: -1.0,
            depth: 4.0,
            floors: 1,
            seed: 1,
            roof_type: RoofType::Flat,
            opening_specs: Vec::new(),
        };
        assert_eq!(
            spec.validate(),
            Err(InvalidSpecError::NonPositiveDimension { field: "width", value: -1.0 })
        );
    }

    #[test]
    fn zero_floors_is_rejected() {
        let spec = BuildingSpec {
            width: 5.0,
            depth: 4.0,
            floors: 0,
            seed: 1,
            roof_type: RoofType::Flat,
            opening_specs: Vec::new(),
        };
        assert_eq!(spec.validate(), Err(InvalidSpecError::ZeroFloors));
    }

    #[test]
    fn out_of_range_ratio_reports_the_opening_index() {
        let spec = BuildingSpec {
            width: 5.0,
            depth: 4.0,
            floors: 1,
            seed: 1,
            roof_type: RoofType::Flat,
            opening_specs: vec![door_at(0.5, "wall_0"), door_at(1.5, "wall_1")],
        };
        assert_eq!(
            spec.validate(),
            Err(InvalidSpecError::PositionRatioOutOfRange { index: 1, value: 1.5 })
        );
    }

    #[test]
    fn wall_spec_rejects_openings_owned_by_other_walls() {
        let spec = WallSpec {
            name: "wall_0".to_string(),
            length: 5.0,
            height: 3.0,
            seed: 1,
            opening_specs: vec![door_at(0.5, "wall_7")],
        };
        assert_eq!(
            spec.validate(),
            Err(InvalidSpecError::UnknownSlotOwner { owner: "wall_7".to_string() })
        );
    }

    #[test]
    fn opening_spec_round_trips_through_json() {
        let json = r#"{"kind":"door","position_ratio":0.5,"slot_owner":"wall_0"}"#;
        let parsed: OpeningSpec = serde_json::from_str(json).expect("valid opening JSON");
        assert_eq!(parsed, door_at(0.5, "wall_0"));
    }
}
