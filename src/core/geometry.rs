//! Vector and angle utilities for geological notation
//!
//! Coordinates are East-North-Up: X = East, Y = North, Z = Up.
//! Azimuths are degrees clockwise from North, dips are degrees below horizontal.
//!
//! Two notations live here and must not be mixed up:
//! - Line notation (principal stress axes): a direction with azimuth and dip,
//!   always reported in the lower hemisphere (Up <= 0).
//! - Plane notation (fault planes): an upward pole, reported as the strike
//!   azimuth of the horizontal line on the plane plus the plane dip.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Norms below this are treated as zero when deciding whether a vector is vertical
pub const VERTICAL_EPSILON: f64 = 1e-10;

/// Azimuth/dip pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Degrees clockwise from North
    pub azimuth: f64,
    /// Degrees below horizontal
    pub dip: f64,
}

impl Orientation {
    pub fn new(azimuth: f64, dip: f64) -> Self {
        Self { azimuth, dip }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:05.1}/{:04.1}", self.azimuth, self.dip)
    }
}

/// Compass octant of a dip direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Compass {
    N,
    E,
    S,
    W,
}

impl Compass {
    /// Classify an azimuth into N [315, 45), E [45, 135), S [135, 225), W [225, 315)
    pub fn from_azimuth(azimuth: f64) -> Self {
        let az = normalize_azimuth(azimuth);
        if !(45.0..315.0).contains(&az) {
            Compass::N
        } else if az < 135.0 {
            Compass::E
        } else if az < 225.0 {
            Compass::S
        } else {
            Compass::W
        }
    }
}

impl std::fmt::Display for Compass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compass::N => write!(f, "N"),
            Compass::E => write!(f, "E"),
            Compass::S => write!(f, "S"),
            Compass::W => write!(f, "W"),
        }
    }
}

/// Geological notation of a fault plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneNotation {
    /// Azimuth of the horizontal line on the plane (dip azimuth + 90)
    pub azimuth: f64,
    /// Plane dip, 0 = horizontal, 90 = vertical
    pub dip: f64,
    /// Azimuth the plane dips towards
    pub dip_azimuth: f64,
    pub dip_direction: Compass,
}

/// Map any angle in degrees into [0, 360)
pub fn normalize_azimuth(degrees: f64) -> f64 {
    let az = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs,
    // and keeps the sign of -0.0
    if az >= 360.0 || az == 0.0 {
        0.0
    } else {
        az
    }
}

/// Horizontal unit vector pointing along `azimuth`
pub fn horizontal_vector(azimuth: f64) -> Vector3<f64> {
    let az = azimuth.to_radians();
    Vector3::new(az.sin(), az.cos(), 0.0)
}

/// Unit vector of a line plunging `dip` degrees below horizontal towards `azimuth`
///
/// ```text
/// East  = cos(dip) · sin(azimuth)
/// North = cos(dip) · cos(azimuth)
/// Up    = -sin(dip)
/// ```
pub fn axis_to_vector(orientation: Orientation) -> Vector3<f64> {
    let az = orientation.azimuth.to_radians();
    let dip = orientation.dip.to_radians();
    Vector3::new(dip.cos() * az.sin(), dip.cos() * az.cos(), -dip.sin())
}

/// Line notation of a direction, taken in the lower hemisphere
///
/// A vertical vector has no defined azimuth and is reported as (0, 90).
pub fn vector_to_axis(vector: &Vector3<f64>) -> Orientation {
    let mut v = *vector;
    let horizontal = (v.x * v.x + v.y * v.y).sqrt();
    if horizontal < VERTICAL_EPSILON {
        return Orientation::new(0.0, 90.0);
    }

    if v.z > 0.0 {
        v = -v;
    }

    let azimuth = normalize_azimuth(v.x.atan2(v.y).to_degrees());
    let dip = v.z.abs().atan2(horizontal).to_degrees();
    Orientation::new(azimuth, dip)
}

/// Convert a fault normal into plane notation
///
/// The normal is flipped to point upward first, so either pole of the plane
/// gives the same result.
pub fn vector_to_notation(normal: &Vector3<f64>) -> PlaneNotation {
    let n = if normal.z < 0.0 { -normal } else { *normal };

    let dip = n.z.clamp(-1.0, 1.0).acos().to_degrees();
    let dip_azimuth = normalize_azimuth(n.x.atan2(n.y).to_degrees());

    PlaneNotation {
        azimuth: normalize_azimuth(dip_azimuth + 90.0),
        dip,
        dip_azimuth,
        dip_direction: Compass::from_azimuth(dip_azimuth),
    }
}

/// Upward unit normal of the plane with strike `azimuth` and `dip`
///
/// Inverse of [`vector_to_notation`]. At dip = 0 the azimuth is lost: a
/// horizontal plane comes back with azimuth 90.
pub fn notation_to_normal(azimuth: f64, dip: f64) -> Vector3<f64> {
    let dip_azimuth = (azimuth - 90.0).to_radians();
    let dip = dip.to_radians();
    Vector3::new(
        dip.sin() * dip_azimuth.sin(),
        dip.sin() * dip_azimuth.cos(),
        dip.cos(),
    )
}

/// Angular difference between two azimuths, in [0, 180]
pub fn azimuth_difference(a: f64, b: f64) -> f64 {
    let d = normalize_azimuth(a - b);
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}
