//! Basis consistency check for plane notation
//!
//! Rebuilds the strike vector and the down-dip vector from a plane's
//! azimuth and dip and checks that their cross product is the plane's
//! normal (either sign). A failure means the notation conversion is broken,
//! not that the plane is physically impossible.

use nalgebra::Vector3;

use crate::core::geometry::{axis_to_vector, horizontal_vector, normalize_azimuth, Orientation};

/// Allowed deviation of |computed · normal| from 1
pub const BASIS_TOLERANCE: f64 = 1e-6;

/// Vectors rebuilt from a plane's notation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    /// Horizontal, along the strike azimuth
    pub strike: Vector3<f64>,
    /// Steepest descent on the plane
    pub down_dip: Vector3<f64>,
    /// down_dip × strike
    pub computed_normal: Vector3<f64>,
}

/// Rebuild the strike and down-dip vectors for a plane
///
/// The plane dips towards `azimuth - 90`, so the down-dip vector is the line
/// plunging `dip` degrees in that direction.
pub fn plane_basis(azimuth: f64, dip: f64) -> PlaneBasis {
    let strike = horizontal_vector(azimuth);
    let down_dip = axis_to_vector(Orientation::new(normalize_azimuth(azimuth - 90.0), dip));
    let computed_normal = down_dip.cross(&strike).normalize();

    PlaneBasis {
        strike,
        down_dip,
        computed_normal,
    }
}

/// True when down_dip × strike matches `normal` up to sign
pub fn validate_plane_vectors(normal: &Vector3<f64>, azimuth: f64, dip: f64) -> bool {
    let basis = plane_basis(azimuth, dip);
    let norm = normal.norm();
    if norm == 0.0 || !norm.is_finite() {
        return false;
    }
    let dot = basis.computed_normal.dot(&(normal / norm));
    (dot.abs() - 1.0).abs() < BASIS_TOLERANCE
}
