//! Stress tensor construction from principal stress orientations
//!
//! Sign convention: compression is negative. The principal magnitudes are
//! fixed at σ1 = -1, σ2 = -R, σ3 = 0 so that only the shape of the tensor
//! (the stress ratio R) and its orientation matter:
//!
//! ```text
//! S = Rot · diag(-1, -R, 0) · Rotᵀ      Rot = [σ1 | σ2 | σ3]
//! ```
//!
//! Nothing here fails. Degenerate or non-orthogonal input is reported through
//! [`StressDiagnostics`] and the tensor is still built.

use nalgebra::{Matrix3, Vector3};
use serde::Serialize;
use tracing::warn;

use crate::core::geometry::{axis_to_vector, vector_to_axis, Orientation};
use crate::core::resolve::{resolve_on_plane, ResolvedStress};

/// Cross products with a norm below this mean σ1 and σ3 are parallel
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Largest |dot| tolerated between two principal axes
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-6;

/// Stress ratio used when the supplied one is not a number
pub const DEFAULT_STRESS_RATIO: f64 = 0.5;

/// Input to the tensor builder
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressSpec {
    pub sigma1: Orientation,
    pub sigma3: Orientation,
    /// Both σ1 and σ3 horizontal, forcing σ2 vertical
    pub andersonian: bool,
    /// R = (σ1 - σ2) / (σ1 - σ3), always within [0, 1]
    pub stress_ratio: f64,
}

impl StressSpec {
    /// Build a spec, clamping R into [0, 1]
    pub fn new(sigma1: Orientation, sigma3: Orientation, andersonian: bool, stress_ratio: f64) -> Self {
        Self {
            sigma1,
            sigma3,
            andersonian,
            stress_ratio: clamp_stress_ratio(stress_ratio),
        }
    }

    /// Build a spec, deriving the Andersonian flag from the two dips
    pub fn with_derived_regime(
        sigma1: Orientation,
        sigma3: Orientation,
        stress_ratio: f64,
        horizontal_tolerance: f64,
    ) -> Self {
        let andersonian = is_andersonian(sigma1, sigma3, horizontal_tolerance);
        Self::new(sigma1, sigma3, andersonian, stress_ratio)
    }
}

/// Clamp R into [0, 1]; NaN falls back to [`DEFAULT_STRESS_RATIO`]
pub fn clamp_stress_ratio(r: f64) -> f64 {
    if r.is_nan() {
        warn!(ratio = r, default = DEFAULT_STRESS_RATIO, "stress ratio is not a number");
        return DEFAULT_STRESS_RATIO;
    }
    r.clamp(0.0, 1.0)
}

/// True when both σ1 and σ3 dip less than `tolerance` degrees
pub fn is_andersonian(sigma1: Orientation, sigma3: Orientation, tolerance: f64) -> bool {
    sigma1.dip.abs() < tolerance && sigma3.dip.abs() < tolerance
}

/// One principal stress direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrincipalAxis {
    /// Unit vector (East, North, Up)
    pub vector: [f64; 3],
    pub orientation: Orientation,
}

impl PrincipalAxis {
    pub fn direction(&self) -> Vector3<f64> {
        Vector3::from(self.vector)
    }
}

/// Anomalies found while building the tensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StressDiagnostics {
    /// σ1 and σ3 were parallel and σ2 fell back to vertical
    pub degenerate: bool,
    /// Number of axis pairs whose |dot| exceeds [`ORTHOGONALITY_TOLERANCE`] (0 to 3)
    pub orthogonality_violations: usize,
    /// Largest |dot| between any two axes
    pub max_dot: f64,
}

impl StressDiagnostics {
    pub fn is_clean(&self) -> bool {
        !self.degenerate && self.orthogonality_violations == 0
    }
}

/// Immutable stress tensor in geographic coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct StressTensor {
    spec: StressSpec,
    sigma1: PrincipalAxis,
    sigma2: PrincipalAxis,
    sigma3: PrincipalAxis,
    matrix: Matrix3<f64>,
    diagnostics: StressDiagnostics,
}

impl StressTensor {
    /// Build the tensor and its principal axes from a spec
    pub fn new(spec: StressSpec) -> Self {
        let s1 = axis_to_vector(spec.sigma1);
        let s3 = axis_to_vector(spec.sigma3);

        let mut diagnostics = StressDiagnostics::default();

        let (s2, sigma2_orientation) = if spec.andersonian {
            (Vector3::new(0.0, 0.0, -1.0), Orientation::new(0.0, 90.0))
        } else {
            let cross = s3.cross(&s1);
            let norm = cross.norm();
            let s2 = if norm > PARALLEL_EPSILON {
                cross / norm
            } else {
                warn!(
                    sigma1 = %spec.sigma1,
                    sigma3 = %spec.sigma3,
                    "σ1 and σ3 are parallel, setting σ2 vertical"
                );
                diagnostics.degenerate = true;
                Vector3::new(0.0, 0.0, -1.0)
            };
            (s2, vector_to_axis(&s2))
        };

        let dots = [s1.dot(&s2).abs(), s1.dot(&s3).abs(), s2.dot(&s3).abs()];
        diagnostics.max_dot = dots.iter().copied().fold(0.0, f64::max);
        diagnostics.orthogonality_violations =
            dots.iter().filter(|d| **d > ORTHOGONALITY_TOLERANCE).count();
        if diagnostics.orthogonality_violations > 0 {
            warn!(
                max_dot = diagnostics.max_dot,
                violations = diagnostics.orthogonality_violations,
                "principal axes are not orthogonal"
            );
        }

        let rotation = Matrix3::from_columns(&[s1, s2, s3]);
        let principal = Matrix3::from_diagonal(&Vector3::new(-1.0, -spec.stress_ratio, 0.0));
        let matrix = rotation * principal * rotation.transpose();

        Self {
            spec,
            sigma1: PrincipalAxis {
                vector: s1.into(),
                orientation: spec.sigma1,
            },
            sigma2: PrincipalAxis {
                vector: s2.into(),
                orientation: sigma2_orientation,
            },
            sigma3: PrincipalAxis {
                vector: s3.into(),
                orientation: spec.sigma3,
            },
            matrix,
            diagnostics,
        }
    }

    pub fn spec(&self) -> &StressSpec {
        &self.spec
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn sigma1(&self) -> &PrincipalAxis {
        &self.sigma1
    }

    pub fn sigma2(&self) -> &PrincipalAxis {
        &self.sigma2
    }

    pub fn sigma3(&self) -> &PrincipalAxis {
        &self.sigma3
    }

    /// Principal axes in order σ1, σ2, σ3 with their display names
    pub fn principal_axes(&self) -> [(&'static str, &PrincipalAxis); 3] {
        [("σ1", &self.sigma1), ("σ2", &self.sigma2), ("σ3", &self.sigma3)]
    }

    pub fn diagnostics(&self) -> &StressDiagnostics {
        &self.diagnostics
    }

    /// Resolve this tensor onto a plane with unit normal `normal`
    pub fn resolve(&self, normal: &Vector3<f64>) -> ResolvedStress {
        resolve_on_plane(&self.matrix, normal)
    }

    /// Matrix rows for serialization
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }
}
