//! Resolution of a stress tensor onto a plane

use nalgebra::{Matrix3, Vector3};

/// Stress acting on one plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStress {
    /// Traction vector t = S · n
    pub traction: Vector3<f64>,
    /// n · t, negative in compression
    pub normal_stress: f64,
    /// t - (n · t) n, tangent to the plane
    pub shear: Vector3<f64>,
    pub shear_magnitude: f64,
}

/// Split the traction on a plane into normal and shear parts
///
/// `normal` must already be unit length; it is not checked here.
pub fn resolve_on_plane(tensor: &Matrix3<f64>, normal: &Vector3<f64>) -> ResolvedStress {
    let traction = tensor * normal;
    let normal_stress = normal.dot(&traction);
    let shear = traction - normal * normal_stress;

    ResolvedStress {
        traction,
        normal_stress,
        shear,
        shear_magnitude: shear.norm(),
    }
}
