//! `faultkit tensor` command - principal axes and stress tensor

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io;

use crate::cli::args::TensorArgs;
use crate::cli::helpers::{format_matrix, print_input_warnings};
use crate::cli::output::effective_format;
use crate::cli::table::axis_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::export::{write_json, write_yaml, TensorReport};
use crate::core::stress::StressTensor;

pub fn run(args: TensorArgs, global: &GlobalOpts) -> Result<()> {
    let (config, warnings) = args.stress.resolve()?;
    print_input_warnings(&warnings);

    let tensor = StressTensor::new(config.stress_spec());
    let report = TensorReport::new(&tensor);

    match effective_format(global.format, false) {
        OutputFormat::Json => write_json(&report, io::stdout().lock()).into_diagnostic()?,
        OutputFormat::Yaml => write_yaml(&report, io::stdout().lock()).into_diagnostic()?,
        OutputFormat::Csv => {
            return Err(miette::miette!(
                "CSV output is only available for fault records; use --format json or yaml"
            ));
        }
        OutputFormat::Table | OutputFormat::Auto => print_tensor(&tensor),
    }

    Ok(())
}

/// Print principal axes, tensor matrix and any construction anomalies
pub fn print_tensor(tensor: &StressTensor) {
    println!("{}", style("Principal stress axes (lower hemisphere)").bold());
    println!("{}", axis_table(tensor));
    println!();
    println!("{}", style("Stress tensor (E, N, U)").bold());
    for row in format_matrix(tensor.matrix()) {
        println!("   {}", row);
    }

    let diagnostics = tensor.diagnostics();
    if diagnostics.degenerate {
        println!(
            "{} σ1 and σ3 are parallel - σ2 set to vertical",
            style("⚠").yellow()
        );
    }
    if diagnostics.orthogonality_violations > 0 {
        println!(
            "{} Principal axes not orthogonal ({} pair(s), max dot product: {:.6})",
            style("⚠").yellow(),
            diagnostics.orthogonality_violations,
            diagnostics.max_dot
        );
    }
}
