//! faultkit: fault slip prediction from a principal stress tensor
//!
//! Builds a stress tensor from σ1/σ3 orientations and a stress ratio, samples
//! fault planes uniformly over the upper hemisphere, resolves normal and
//! shear stress on each plane and classifies the predicted slip (rake and
//! sense of movement) in geological notation.

pub mod cli;
pub mod core;
