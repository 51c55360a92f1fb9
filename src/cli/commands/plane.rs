//! `faultkit plane` command - resolve stress on one plane

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io;

use crate::cli::args::PlaneArgs;
use crate::cli::helpers::{
    format_angle, format_azimuth, format_stress, format_vector, print_input_warnings,
};
use crate::cli::output::effective_format;
use crate::cli::table::fault_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::analysis::analyze_plane;
use crate::core::export::{write_csv, write_json, write_yaml};
use crate::core::geometry::notation_to_normal;
use crate::core::stress::StressTensor;

pub fn run(args: PlaneArgs, global: &GlobalOpts) -> Result<()> {
    if !args.azimuth.is_finite() || !args.dip.is_finite() {
        return Err(miette::miette!("Plane azimuth and dip must be finite numbers"));
    }
    if !(0.0..=90.0).contains(&args.dip) {
        return Err(miette::miette!(
            "Plane dip must be between 0 and 90 degrees, got {}",
            args.dip
        ));
    }

    let (config, warnings) = args.stress.resolve()?;
    print_input_warnings(&warnings);

    let tensor = StressTensor::new(config.stress_spec());
    let normal = notation_to_normal(args.azimuth, args.dip);
    let record = analyze_plane(&tensor, 1, &normal);
    let resolved = tensor.resolve(&normal);

    match effective_format(global.format, false) {
        OutputFormat::Csv => write_csv(std::slice::from_ref(&record), io::stdout().lock())
            .into_diagnostic()?,
        OutputFormat::Json => write_json(&record, io::stdout().lock()).into_diagnostic()?,
        OutputFormat::Yaml => write_yaml(&record, io::stdout().lock()).into_diagnostic()?,
        OutputFormat::Table | OutputFormat::Auto => {
            println!(
                "{} Plane {}/{} (dips {} towards {})",
                style("⚙").cyan(),
                format_azimuth(record.azimuth),
                format_angle(record.dip),
                record.dip_direction,
                format_azimuth(record.azimuth - 90.0)
            );
            println!("   Normal:   {}", format_vector(&record.normal));
            println!("   Traction: {}", format_vector(&resolved.traction.into()));
            println!("   Shear:    {}", format_vector(&resolved.shear.into()));
            println!(
                "   Normal stress {}, shear stress {}",
                format_stress(record.normal_stress),
                format_stress(record.shear_stress)
            );
            println!("{}", fault_table([&record]));
        }
    }

    Ok(())
}
