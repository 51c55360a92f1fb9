//! Terminal tables

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{format_angle, format_azimuth, format_stress, format_vector};
use crate::core::export::round_azimuth;
use crate::core::analysis::FaultRecord;
use crate::core::stress::StressTensor;

/// One fault record as displayed
#[derive(Tabled)]
pub struct FaultRow {
    #[tabled(rename = "PLANE")]
    pub plane: usize,
    #[tabled(rename = "AZIMUTH")]
    pub azimuth: String,
    #[tabled(rename = "DIP")]
    pub dip: String,
    #[tabled(rename = "DIR")]
    pub dip_direction: String,
    #[tabled(rename = "NORMAL")]
    pub normal_stress: String,
    #[tabled(rename = "SHEAR")]
    pub shear_stress: String,
    #[tabled(rename = "RAKE")]
    pub rake: String,
    #[tabled(rename = "MOVEMENT")]
    pub movement: String,
    #[tabled(rename = "REF AZ")]
    pub reference_azimuth: String,
    #[tabled(rename = "VALID")]
    pub vector_valid: String,
}

impl From<&FaultRecord> for FaultRow {
    fn from(r: &FaultRecord) -> Self {
        Self {
            plane: r.plane,
            azimuth: format_azimuth(r.azimuth),
            dip: format_angle(r.dip),
            dip_direction: r.dip_direction.to_string(),
            normal_stress: format_stress(r.normal_stress),
            shear_stress: format_stress(r.shear_stress),
            rake: format_angle(r.rake),
            movement: r.movement.code(),
            reference_azimuth: format_azimuth(r.reference_azimuth),
            vector_valid: if r.vector_valid { "yes" } else { "NO" }.to_string(),
        }
    }
}

/// Principal axis as displayed
#[derive(Tabled)]
pub struct AxisRow {
    #[tabled(rename = "AXIS")]
    pub axis: &'static str,
    #[tabled(rename = "AZIMUTH")]
    pub azimuth: String,
    #[tabled(rename = "DIP")]
    pub dip: String,
    #[tabled(rename = "VECTOR (E, N, U)")]
    pub vector: String,
    #[tabled(rename = "MAGNITUDE")]
    pub magnitude: String,
}

pub fn fault_table<'a>(records: impl IntoIterator<Item = &'a FaultRecord>) -> String {
    let rows: Vec<FaultRow> = records.into_iter().map(FaultRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn axis_table(tensor: &StressTensor) -> String {
    let magnitudes = [-1.0, -tensor.spec().stress_ratio, 0.0];
    let rows: Vec<AxisRow> = tensor
        .principal_axes()
        .into_iter()
        .zip(magnitudes)
        .map(|((name, axis), magnitude)| AxisRow {
            axis: name,
            azimuth: format!("{:.1}", round_azimuth(axis.orientation.azimuth, 1)),
            dip: format!("{:.1}", axis.orientation.dip),
            vector: format_vector(&axis.vector),
            magnitude: format_stress(magnitude),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
