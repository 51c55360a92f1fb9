//! Random fault plane orientations
//!
//! Normals are drawn uniformly over the upper hemisphere. By Archimedes'
//! hat-box theorem a uniform point on the sphere has a z-coordinate uniform
//! in [-1, 1], so drawing u in [0.5, 1] and setting cos(colatitude) = 2u - 1
//! gives z uniform in [0, 1] and E[z] = 0.5. Drawing the colatitude itself
//! uniformly would crowd samples around the pole.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Draw one unit normal with z >= 0
pub fn sample_normal<R: Rng>(rng: &mut R) -> Vector3<f64> {
    let theta = rng.random_range(0.0..TAU);
    let u: f64 = rng.random_range(0.5..=1.0);
    let colatitude = (2.0 * u - 1.0).clamp(0.0, 1.0).acos();

    let v = Vector3::new(
        colatitude.sin() * theta.cos(),
        colatitude.sin() * theta.sin(),
        colatitude.cos(),
    );
    v.normalize()
}

/// Seeded or entropy-backed source of fault normals
#[derive(Debug, Clone)]
pub struct FaultSampler {
    rng: StdRng,
}

impl FaultSampler {
    /// Reproducible sampler when `seed` is given, OS entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    pub fn next_normal(&mut self) -> Vector3<f64> {
        sample_normal(&mut self.rng)
    }

    /// Draw `count` independent normals in sampling order
    pub fn sample(&mut self, count: usize) -> Vec<Vector3<f64>> {
        (0..count).map(|_| self.next_normal()).collect()
    }
}
