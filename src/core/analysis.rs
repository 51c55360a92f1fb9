//! Fault population analysis
//!
//! Builds the stress tensor once, samples fault normals and pushes each one
//! through notation, resolution, slip classification and the basis check.
//! Row `i` of the result always belongs to the `i`-th sampled normal, and
//! every sampled fault produces a row; anomalies are flagged, never dropped.

use nalgebra::Vector3;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::core::config::AnalysisConfig;
use crate::core::geometry::{vector_to_notation, Compass};
use crate::core::sampler::FaultSampler;
use crate::core::slip::{classify_slip, SenseOfMovement};
use crate::core::stress::StressTensor;
use crate::core::validate::validate_plane_vectors;

/// One row of the output table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultRecord {
    /// 1-based plane index
    pub plane: usize,
    /// Strike azimuth (degrees)
    pub azimuth: f64,
    pub dip: f64,
    pub dip_direction: Compass,
    /// Negative in compression
    pub normal_stress: f64,
    /// Shear stress magnitude
    pub shear_stress: f64,
    pub rake: f64,
    pub movement: SenseOfMovement,
    pub reference_azimuth: f64,
    pub vector_valid: bool,
    /// Upward unit normal as sampled
    pub normal: [f64; 3],
}

/// Analyse one plane given by its unit normal
pub fn analyze_plane(tensor: &StressTensor, plane: usize, normal: &Vector3<f64>) -> FaultRecord {
    let notation = vector_to_notation(normal);
    let vector_valid = validate_plane_vectors(normal, notation.azimuth, notation.dip);
    if !vector_valid {
        warn!(
            plane,
            azimuth = notation.azimuth,
            dip = notation.dip,
            "plane basis does not reproduce its normal"
        );
    }

    let resolved = tensor.resolve(normal);
    let slip = classify_slip(normal, &resolved.shear, notation.azimuth);

    debug!(
        plane,
        azimuth = notation.azimuth,
        dip = notation.dip,
        normal_stress = resolved.normal_stress,
        shear = resolved.shear_magnitude,
        rake = slip.rake,
        movement = %slip.movement,
        "resolved fault plane"
    );

    FaultRecord {
        plane,
        azimuth: notation.azimuth,
        dip: notation.dip,
        dip_direction: notation.dip_direction,
        normal_stress: resolved.normal_stress,
        shear_stress: resolved.shear_magnitude,
        rake: slip.rake,
        movement: slip.movement,
        reference_azimuth: slip.reference_azimuth,
        vector_valid,
        normal: (*normal).into(),
    }
}

/// Analyse a list of normals, numbering rows from 1 in input order
pub fn analyze_normals(tensor: &StressTensor, normals: &[Vector3<f64>]) -> Vec<FaultRecord> {
    normals
        .iter()
        .enumerate()
        .map(|(i, n)| analyze_plane(tensor, i + 1, n))
        .collect()
}

/// Closed range of a column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Range { min: v, max: v }),
            Some(r) => Some(Range {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

/// Aggregate diagnostics over the sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub plane_count: usize,
    /// Principal axis pairs that are not orthogonal
    pub orthogonality_violations: usize,
    /// σ1 and σ3 were parallel
    pub degenerate_axes: bool,
    pub invalid_vectors: usize,
    /// 1-based indices of planes that failed the basis check
    pub invalid_planes: Vec<usize>,
    pub normal_stress: Option<Range>,
    pub shear_stress: Option<Range>,
    pub mean_rake: Option<f64>,
    /// Planes per movement code
    pub movement_counts: BTreeMap<String, usize>,
}

impl AnalysisSummary {
    pub fn from_records(tensor: &StressTensor, records: &[FaultRecord]) -> Self {
        let invalid_planes: Vec<usize> = records
            .iter()
            .filter(|r| !r.vector_valid)
            .map(|r| r.plane)
            .collect();

        let mut movement_counts = BTreeMap::new();
        for record in records {
            *movement_counts.entry(record.movement.code()).or_insert(0) += 1;
        }

        let mean_rake = if records.is_empty() {
            None
        } else {
            Some(records.iter().map(|r| r.rake).sum::<f64>() / records.len() as f64)
        };

        let diagnostics = tensor.diagnostics();
        Self {
            plane_count: records.len(),
            orthogonality_violations: diagnostics.orthogonality_violations,
            degenerate_axes: diagnostics.degenerate,
            invalid_vectors: invalid_planes.len(),
            invalid_planes,
            normal_stress: Range::of(records.iter().map(|r| r.normal_stress)),
            shear_stress: Range::of(records.iter().map(|r| r.shear_stress)),
            mean_rake,
            movement_counts,
        }
    }

    pub fn valid_vectors(&self) -> usize {
        self.plane_count - self.invalid_vectors
    }
}

/// Full result of one run
#[derive(Debug, Clone)]
pub struct FaultAnalysis {
    pub config: AnalysisConfig,
    pub tensor: StressTensor,
    pub records: Vec<FaultRecord>,
    pub summary: AnalysisSummary,
}

/// Run the whole pipeline for a config
pub fn run_analysis(config: &AnalysisConfig) -> FaultAnalysis {
    let tensor = StressTensor::new(config.stress_spec());
    let mut sampler = FaultSampler::new(config.seed);

    info!(
        faults = config.fault_count,
        seed = ?config.seed,
        andersonian = tensor.spec().andersonian,
        "sampling fault planes"
    );

    let normals = sampler.sample(config.fault_count);
    let records = analyze_normals(&tensor, &normals);
    let summary = AnalysisSummary::from_records(&tensor, &records);

    if summary.invalid_vectors > 0 {
        warn!(
            invalid = summary.invalid_vectors,
            total = summary.plane_count,
            "fault planes failed the basis check"
        );
    }

    FaultAnalysis {
        config: config.clone(),
        tensor,
        records,
        summary,
    }
}
