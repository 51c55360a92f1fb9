//! Core module - stress resolution and slip classification

pub mod analysis;
pub mod config;
pub mod export;
pub mod geometry;
pub mod resolve;
pub mod sampler;
pub mod slip;
pub mod stress;
pub mod validate;

pub use analysis::{
    analyze_normals, analyze_plane, run_analysis, AnalysisSummary, FaultAnalysis, FaultRecord,
    Range,
};
pub use config::{AnalysisConfig, ConfigError, InputWarning, RawParameters, RawValue};
pub use export::{write_csv, write_json, write_yaml, AnalysisReport, ExportError, TensorReport};
pub use geometry::{
    axis_to_vector, horizontal_vector, normalize_azimuth, notation_to_normal, vector_to_axis,
    vector_to_notation, Compass, Orientation, PlaneNotation,
};
pub use resolve::{resolve_on_plane, ResolvedStress};
pub use sampler::{sample_normal, FaultSampler};
pub use slip::{classify_slip, LateralSense, SenseOfMovement, SlipRecord, VerticalSense};
pub use stress::{PrincipalAxis, StressDiagnostics, StressSpec, StressTensor};
pub use validate::{plane_basis, validate_plane_vectors, PlaneBasis};
