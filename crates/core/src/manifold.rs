//! Euler-characteristic validation of emitted solid topology.

use std::fmt;

use serde::Serialize;

/// Vertex, edge, and face counts of one emitted solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SolidCounts {
    pub vertices: u32,
    pub edges: u32,
    pub faces: u32,
}

impl SolidCounts {
    /// Any axis-aligned box solid.
    pub const CUBOID: SolidCounts = SolidCounts { vertices: 8, edges: 12, faces: 6 };

    pub fn euler_characteristic(self) -> i64 {
        i64::from(self.vertices) - i64::from(self.edges) + i64::from(self.faces)
    }
}

/// A generated solid whose surface is not closed (genus-0 Euler invariant
/// violated). Terminal: blocks export, no automatic repair is attempted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonManifoldError {
    pub solid: String,
    pub expected: i64,
    pub actual: i64,
    pub counts: SolidCounts,
}

impl fmt::Display for NonManifoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "solid '{}' is not manifold: V - E + F = {} - {} + {} = {}, expected {}",
            self.solid,
            self.counts.vertices,
            self.counts.edges,
            self.counts.faces,
            self.actual,
            self.expected
        )
    }
}

/// Check `V - E + F == 2` for a genus-0 solid.
pub fn validate(solid: &str, counts: SolidCounts) -> Result<(), NonManifoldError> {
    let actual = counts.euler_characteristic();
    if actual == 2 {
        Ok(())
    } else {
        Err(NonManifoldError { solid: solid.to_string(), expected: 2, actual, counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_counts_satisfy_the_euler_invariant() {
        assert_eq!(validate("cube", SolidCounts { vertices: 8, edges: 12, faces: 6 }), Ok(()));
        assert_eq!(validate("box", SolidCounts::CUBOID), Ok(()));
    }

    #[test]
    fn missing_face_fails_with_expected_and_actual_characteristic() {
        let err = validate("cube", SolidCounts { vertices: 8, edges: 12, faces: 5 })
            .expect_err("open box must fail");
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 1);
        assert_eq!(err.counts, SolidCounts { vertices: 8, edges: 12, faces: 5 });
        assert_eq!(err.solid, "cube");
    }

    #[test]
    fn toroidal_counts_fail() {
        // A torus-like quad mesh has characteristic 0.
        let err = validate("ring", SolidCounts { vertices: 16, edges: 32, faces: 16 })
            .expect_err("genus-1 topology must fail");
        assert_eq!(err.actual, 0);
    }
}
