//! Slip classification: rake and sense of movement
//!
//! The predicted striation is the direction of resolved shear stress. Its
//! rake is the acute angle to the strike line, measured from whichever of
//! the two strike directions (azimuth or azimuth + 180) gives that angle,
//! and its sense of movement is read from the vertical and along-strike
//! components of the striation.

use nalgebra::Vector3;
use serde::{Serialize, Serializer};

use crate::core::geometry::{horizontal_vector, normalize_azimuth};

/// Shear magnitudes at or below this count as no slip
pub const NO_SLIP_EPSILON: f64 = 1e-12;

/// In-plane striations shorter than this are treated as degenerate
pub const IN_PLANE_EPSILON: f64 = 1e-10;

/// Components within ±0.1 of zero do not contribute to the movement code
pub const MOVEMENT_DEAD_ZONE: f64 = 0.1;

/// Dip-slip part of the movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerticalSense {
    /// Hanging wall up (thrust)
    Inverse,
    /// Hanging wall down
    Normal,
}

/// Strike-slip part of the movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LateralSense {
    LeftLateral,
    RightLateral,
}

/// Sense of movement, written I, N, LL, RL or joined with `+` (e.g. `I+RL`)
///
/// When neither component clears the dead zone the code is `N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SenseOfMovement {
    pub vertical: Option<VerticalSense>,
    pub lateral: Option<LateralSense>,
}

impl SenseOfMovement {
    /// No vertical or lateral component
    pub fn none() -> Self {
        Self::default()
    }

    /// Classify a unit striation against the strike direction vector
    pub fn classify(striation: &Vector3<f64>, strike_direction: &Vector3<f64>) -> Self {
        let vertical = if striation.z > MOVEMENT_DEAD_ZONE {
            Some(VerticalSense::Inverse)
        } else if striation.z < -MOVEMENT_DEAD_ZONE {
            Some(VerticalSense::Normal)
        } else {
            None
        };

        let along_strike = striation.dot(strike_direction);
        let lateral = if along_strike > MOVEMENT_DEAD_ZONE {
            Some(LateralSense::LeftLateral)
        } else if along_strike < -MOVEMENT_DEAD_ZONE {
            Some(LateralSense::RightLateral)
        } else {
            None
        };

        Self { vertical, lateral }
    }

    pub fn is_none(&self) -> bool {
        self.vertical.is_none() && self.lateral.is_none()
    }

    pub fn code(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        match self.vertical {
            Some(VerticalSense::Inverse) => parts.push("I"),
            Some(VerticalSense::Normal) => parts.push("N"),
            None => {}
        }
        match self.lateral {
            Some(LateralSense::LeftLateral) => parts.push("LL"),
            Some(LateralSense::RightLateral) => parts.push("RL"),
            None => {}
        }
        if parts.is_empty() {
            "N".to_string()
        } else {
            parts.join("+")
        }
    }
}

impl std::fmt::Display for SenseOfMovement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

impl Serialize for SenseOfMovement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

/// Predicted slip on one fault plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlipRecord {
    /// Acute angle between strike line and striation, 0 to 90 degrees
    pub rake: f64,
    pub movement: SenseOfMovement,
    /// Strike direction the rake is measured from
    pub reference_azimuth: f64,
}

/// Rake, sense of movement and reference azimuth for a plane
///
/// `azimuth` is the strike azimuth from
/// [`vector_to_notation`](crate::core::geometry::vector_to_notation). Both
/// strike directions give the same acute rake, so the reference azimuth is
/// decided by the tie-break: the strike direction the striation points along
/// wins, even when that replaces `azimuth` with `azimuth + 180`.
pub fn classify_slip(normal: &Vector3<f64>, shear: &Vector3<f64>, azimuth: f64) -> SlipRecord {
    let azimuth = normalize_azimuth(azimuth);
    let magnitude = shear.norm();
    if magnitude <= NO_SLIP_EPSILON {
        return SlipRecord {
            rake: 0.0,
            movement: SenseOfMovement::none(),
            reference_azimuth: azimuth,
        };
    }

    let striation = shear / magnitude;
    let strike = horizontal_vector(azimuth);
    let movement = SenseOfMovement::classify(&striation, &strike);

    let on_plane = striation - normal * striation.dot(normal);
    let on_plane_norm = on_plane.norm();
    if on_plane_norm <= IN_PLANE_EPSILON {
        return SlipRecord {
            rake: 0.0,
            movement,
            reference_azimuth: azimuth,
        };
    }
    let on_plane = on_plane / on_plane_norm;

    let candidates = [
        (azimuth, strike),
        (normalize_azimuth(azimuth + 180.0), -strike),
    ];
    let (reference_azimuth, _, rake) = candidates
        .iter()
        .map(|(az, direction)| {
            let cos = direction.dot(&on_plane).clamp(-1.0, 1.0);
            (*az, cos, cos.abs().acos().to_degrees())
        })
        .min_by(|a, b| a.2.total_cmp(&b.2).then(b.1.total_cmp(&a.1)))
        .unwrap_or((azimuth, 1.0, 0.0));

    SlipRecord {
        rake: rake.clamp(0.0, 90.0),
        movement,
        reference_azimuth,
    }
}
