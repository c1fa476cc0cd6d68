//! Command runner: reads a command JSON, executes the build request, and
//! writes a result JSON. Exit code is zero only on full success; core errors
//! are serialized into the output file, not just printed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use buildcore::atoms::{STORY_HEIGHT, WALL_THICKNESS};
use buildcore::{
    BuildError, BuildingSpec, GeneratedBuilding, GeneratedWall, InvalidSpecError, OpeningSpec,
    RoofType, WallSpec, build_wall, generate_building,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the command JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Path the result JSON is written to
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum Command {
    CreateWall {
        #[serde(default)]
        seed: u64,
        asset: WallAsset,
    },
    GenerateBuilding {
        #[serde(default)]
        seed: u64,
        spec: BuildingParams,
    },
}

#[derive(Deserialize)]
struct WallAsset {
    name: String,
    dimensions: WallDimensions,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    opening_specs: Vec<OpeningSpec>,
}

#[derive(Deserialize)]
struct WallDimensions {
    width: f64,
    height: Option<f64>,
}

fn default_width() -> f64 {
    20.0
}

fn default_depth() -> f64 {
    16.0
}

fn default_floors() -> u32 {
    1
}

#[derive(Deserialize)]
struct BuildingParams {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_depth")]
    depth: f64,
    #[serde(default = "default_floors")]
    floors: u32,
    #[serde(default)]
    roof: RoofType,
    #[serde(default)]
    opening_specs: Vec<OpeningSpec>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Success { result: Value },
    Error { kind: String, message: String, details: Value },
}

fn main() -> Result<()> {
    let args = Args::parse();
    match run_command(&args.input, &args.output)? {
        Outcome::Success { .. } => {
            println!("Command complete. Result written to {}", args.output.display());
            Ok(())
        }
        Outcome::Error { kind, message, .. } => bail!("command failed ({kind}): {message}"),
    }
}

/// Execute the command file and write the outcome JSON. The outcome is
/// written for error results too, so callers always get a report.
fn run_command(input: &Path, output: &Path) -> Result<Outcome> {
    let input_data = fs::read_to_string(input)
        .with_context(|| format!("Failed to read command file: {}", input.display()))?;
    let command: Command =
        serde_json::from_str(&input_data).context("Failed to deserialize command JSON")?;

    let outcome = match command {
        Command::CreateWall { seed, asset } => {
            let spec = WallSpec {
                name: asset.name.clone(),
                length: asset.dimensions.width,
                height: asset.dimensions.height.unwrap_or(STORY_HEIGHT),
                seed,
                opening_specs: asset.opening_specs.clone(),
            };
            match build_wall(&spec) {
                Ok(wall) => wall_success(&asset, &spec, &wall),
                Err(error) => error_outcome(&error),
            }
        }
        Command::GenerateBuilding { seed, spec: params } => {
            let spec = BuildingSpec {
                width: params.width,
                depth: params.depth,
                floors: params.floors,
                seed,
                roof_type: params.roof,
                opening_specs: params.opening_specs,
            };
            match generate_building(&spec) {
                Ok(building) => building_success(&spec, &building),
                Err(error) => error_outcome(&error),
            }
        }
    };

    let output_json =
        serde_json::to_string_pretty(&outcome).context("Failed to serialize result JSON")?;
    fs::write(output, output_json)
        .with_context(|| format!("Failed to write result file: {}", output.display()))?;
    Ok(outcome)
}

fn wall_success(asset: &WallAsset, spec: &WallSpec, wall: &GeneratedWall) -> Outcome {
    let slots: Vec<Value> = wall
        .openings
        .iter()
        .map(|placed| json!({ "slot": placed.slot, "object": placed.object }))
        .collect();
    Outcome::Success {
        result: json!({
            "asset_name": asset.name,
            "tags": asset.tags,
            "dimensions": {
                "width": spec.length,
                "height": spec.height,
                "thickness": WALL_THICKNESS,
            },
            "slots": slots,
            "occupied_cells": wall.occupancy.occupied_cells(),
            "solids": wall.mesh.len(),
            "manifold": "pass",
            "fingerprint": format!("{:016x}", wall.fingerprint()),
        }),
    }
}

fn building_success(spec: &BuildingSpec, building: &GeneratedBuilding) -> Outcome {
    Outcome::Success {
        result: json!({
            "walls": building.walls.len(),
            "openings": building.openings.len(),
            "floors": spec.floors,
            "roof": spec.roof_type.as_str(),
            "occupied_cells": building.occupancy.occupied_cells(),
            "solids": building.mesh.len(),
            "manifold": "pass",
            "fingerprint": format!("{:016x}", building.fingerprint()),
        }),
    }
}

fn invalid_spec_details(error: &InvalidSpecError) -> Value {
    match error {
        InvalidSpecError::NonPositiveDimension { field, value } => {
            json!({ "field": field, "value": value })
        }
        InvalidSpecError::SpanTooNarrow { field, value, minimum } => {
            json!({ "field": field, "value": value, "minimum": minimum })
        }
        InvalidSpecError::ZeroFloors => json!({}),
        InvalidSpecError::PositionRatioOutOfRange { index, value } => {
            json!({ "opening_index": index, "value": value })
        }
        InvalidSpecError::UnknownSlotOwner { owner } => json!({ "owner": owner }),
        InvalidSpecError::EmptyFootprint { id } => json!({ "object": id }),
        InvalidSpecError::ReservedOutsideFootprint { id, slot } => {
            json!({ "object": id, "slot": slot })
        }
        InvalidSpecError::OverlappingReservedSlots { id, first, second } => {
            json!({ "object": id, "first": first, "second": second })
        }
    }
}

fn error_outcome(error: &BuildError) -> Outcome {
    let (kind, details) = match error {
        BuildError::InvalidCoordinate(inner) => {
            ("invalid_coordinate", json!({ "axis": inner.axis, "value": inner.value }))
        }
        BuildError::InvalidSpec(inner) => ("invalid_spec", invalid_spec_details(inner)),
        BuildError::Collision(inner) => (
            "collision",
            json!({
                "cell": inner.cell,
                "existing": inner.existing,
                "incoming": inner.incoming,
            }),
        ),
        BuildError::Composition(inner) => ("composition", json!({ "error": format!("{inner}") })),
        BuildError::NonManifold { error: inner, .. } => (
            "non_manifold",
            json!({
                "solid": inner.solid,
                "expected": inner.expected,
                "actual": inner.actual,
                "counts": inner.counts,
            }),
        ),
    };
    Outcome::Error { kind: kind.to_string(), message: error.to_string(), details }
}
