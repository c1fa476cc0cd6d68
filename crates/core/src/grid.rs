//! Quantized grid space: conversion between meter coordinates and integer cells.

use std::fmt;

use crate::types::GridPos;

/// Real-world length of one grid step, in meters.
pub const GRID_UNIT: f64 = 0.25;

/// A coordinate that cannot be snapped to the grid (NaN or infinite).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidCoordinateError {
    pub axis: &'static str,
    pub value: f64,
}

impl fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "non-finite coordinate on axis '{}': {}", self.axis, self.value)
    }
}

/// Snap a known-finite meter value to the nearest grid step.
pub(crate) fn snap(meters: f64) -> i32 {
    (meters / GRID_UNIT).round() as i32
}

/// Round a meter coordinate to the nearest multiple of [`GRID_UNIT`].
///
/// Lossy for arbitrary reals (that is the intended snapping behavior),
/// exact for values already on the grid.
pub fn quantize(axis: &'static str, meters: f64) -> Result<i32, InvalidCoordinateError> {
    if !meters.is_finite() {
        return Err(InvalidCoordinateError { axis, value: meters });
    }
    Ok(snap(meters))
}

/// Snap a length to grid units, never collapsing below one cell.
pub fn quantize_len(axis: &'static str, meters: f64) -> Result<i32, InvalidCoordinateError> {
    Ok(quantize(axis, meters)?.max(1))
}

pub fn quantize_point(x: f64, y: f64, z: f64) -> Result<GridPos, InvalidCoordinateError> {
    Ok(GridPos { x: quantize("x", x)?, y: quantize("y", y)?, z: quantize("z", z)? })
}

/// Exact inverse of [`quantize`] for values it produced.
pub fn dequantize(units: i32) -> f64 {
    f64::from(units) * GRID_UNIT
}

pub fn dequantize_point(pos: GridPos) -> (f64, f64, f64) {
    (dequantize(pos.x), dequantize(pos.y), dequantize(pos.z))
}
