//! Flat tabular export of fault records

use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::core::analysis::{AnalysisSummary, FaultRecord};
use crate::core::config::AnalysisConfig;
use crate::core::geometry::normalize_azimuth;
use crate::core::stress::{PrincipalAxis, StressDiagnostics, StressTensor};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round an azimuth, keeping it in [0, 360) when it rounds up to 360
pub fn round_azimuth(azimuth: f64, decimals: i32) -> f64 {
    normalize_azimuth(round_to(azimuth, decimals))
}

/// CSV row: angles to 2 decimals, stresses to 6
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Plane")]
    plane: usize,
    #[serde(rename = "Azimuth")]
    azimuth: f64,
    #[serde(rename = "Dip")]
    dip: f64,
    #[serde(rename = "Dip_Direction")]
    dip_direction: String,
    #[serde(rename = "Normal_Stress")]
    normal_stress: f64,
    #[serde(rename = "Shear_Stress")]
    shear_stress: f64,
    #[serde(rename = "Rake")]
    rake: f64,
    #[serde(rename = "Movement")]
    movement: &'a str,
    #[serde(rename = "Reference_Az")]
    reference_azimuth: f64,
    #[serde(rename = "Vector_Valid")]
    vector_valid: bool,
    #[serde(rename = "Normal_E")]
    normal_east: f64,
    #[serde(rename = "Normal_N")]
    normal_north: f64,
    #[serde(rename = "Normal_Up")]
    normal_up: f64,
}

/// Write records as CSV with a header row
pub fn write_csv<W: Write>(records: &[FaultRecord], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        let movement = record.movement.code();
        wtr.serialize(CsvRow {
            plane: record.plane,
            azimuth: round_azimuth(record.azimuth, 2),
            dip: round_to(record.dip, 2),
            dip_direction: record.dip_direction.to_string(),
            normal_stress: round_to(record.normal_stress, 6),
            shear_stress: round_to(record.shear_stress, 6),
            rake: round_to(record.rake, 2),
            movement: &movement,
            reference_azimuth: round_azimuth(record.reference_azimuth, 2),
            vector_valid: record.vector_valid,
            normal_east: round_to(record.normal[0], 6),
            normal_north: round_to(record.normal[1], 6),
            normal_up: round_to(record.normal[2], 6),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serializable view of the tensor and its axes
#[derive(Debug, Serialize)]
pub struct TensorReport<'a> {
    pub andersonian: bool,
    pub stress_ratio: f64,
    pub sigma1: &'a PrincipalAxis,
    pub sigma2: &'a PrincipalAxis,
    pub sigma3: &'a PrincipalAxis,
    pub matrix: [[f64; 3]; 3],
    pub diagnostics: &'a StressDiagnostics,
}

impl<'a> TensorReport<'a> {
    pub fn new(tensor: &'a StressTensor) -> Self {
        Self {
            andersonian: tensor.spec().andersonian,
            stress_ratio: tensor.spec().stress_ratio,
            sigma1: tensor.sigma1(),
            sigma2: tensor.sigma2(),
            sigma3: tensor.sigma3(),
            matrix: tensor.rows(),
            diagnostics: tensor.diagnostics(),
        }
    }
}

/// Everything a run produced, for JSON/YAML output
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub config: &'a AnalysisConfig,
    pub tensor: TensorReport<'a>,
    pub summary: &'a AnalysisSummary,
    pub records: &'a [FaultRecord],
}

pub fn write_json<W: Write, T: Serialize>(value: &T, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_yaml<W: Write, T: Serialize>(value: &T, mut writer: W) -> Result<(), ExportError> {
    let yaml = serde_yml::to_string(value)?;
    writer.write_all(yaml.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::run_analysis;

    fn small_run() -> crate::core::analysis::FaultAnalysis {
        run_analysis(&AnalysisConfig {
            fault_count: 5,
            ..Default::default()
        })
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(-0.0000004, 6), -0.0);
    }

    #[test]
    fn test_round_azimuth_wraps() {
        assert_eq!(round_azimuth(359.997, 2), 0.0);
        assert_eq!(round_azimuth(359.994, 2), 359.99);
        assert_eq!(round_azimuth(12.345, 1), 12.3);
    }

    #[test]
    fn test_csv_azimuth_never_reaches_360() {
        use crate::core::analysis::analyze_plane;
        use crate::core::geometry::notation_to_normal;
        use crate::core::stress::StressTensor;

        let tensor = StressTensor::new(AnalysisConfig::default().stress_spec());
        let record = analyze_plane(&tensor, 1, &notation_to_normal(359.997, 40.0));
        assert!(record.azimuth > 359.99);

        let mut buf = Vec::new();
        write_csv(std::slice::from_ref(&record), &mut buf).unwrap();
        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let row = rdr.records().next().unwrap().unwrap();

        let azimuth: f64 = row[1].parse().unwrap();
        let reference: f64 = row[8].parse().unwrap();
        assert!((0.0..360.0).contains(&azimuth), "azimuth {}", azimuth);
        assert!((0.0..360.0).contains(&reference), "reference {}", reference);
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_plane() {
        let analysis = small_run();
        let mut buf = Vec::new();
        write_csv(&analysis.records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with(
            "Plane,Azimuth,Dip,Dip_Direction,Normal_Stress,Shear_Stress,Rake,Movement,Reference_Az,Vector_Valid"
        ));
        assert!(lines[1].starts_with("1,"));
        assert!(lines[5].starts_with("5,"));
    }

    #[test]
    fn test_csv_reads_back() {
        let analysis = small_run();
        let mut buf = Vec::new();
        write_csv(&analysis.records, &mut buf).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        for (row, record) in rows.iter().zip(&analysis.records) {
            assert_eq!(&row[7], record.movement.code());
            assert_eq!(&row[9], "true");
            let azimuth: f64 = row[1].parse().unwrap();
            assert!((azimuth - record.azimuth).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn test_json_report() {
        let analysis = small_run();
        let report = AnalysisReport {
            config: &analysis.config,
            tensor: TensorReport::new(&analysis.tensor),
            summary: &analysis.summary,
            records: &analysis.records,
        };
        let mut buf = Vec::new();
        write_json(&report, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["records"].as_array().unwrap().len(), 5);
        assert_eq!(value["summary"]["plane_count"], 5);
        assert_eq!(value["tensor"]["sigma2"]["vector"].as_array().unwrap().len(), 3);
        assert!(value["records"][0]["movement"].is_string());
    }

    #[test]
    fn test_yaml_report() {
        let analysis = small_run();
        let mut buf = Vec::new();
        write_yaml(&analysis.summary, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("plane_count: 5"));
        assert!(text.contains("movement_counts:"));
    }
}
