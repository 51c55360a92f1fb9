//! `faultkit analyze` command - sample fault planes and classify their slip

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::cli::args::AnalyzeArgs;
use crate::cli::commands::tensor::print_tensor;
use crate::cli::helpers::{format_stress, preview_list, print_input_warnings};
use crate::cli::output::effective_format;
use crate::cli::table::fault_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::analysis::{run_analysis, AnalysisSummary, FaultAnalysis};
use crate::core::export::{write_csv, write_json, write_yaml, AnalysisReport, TensorReport};

/// Invalid plane indices listed before the rest are elided
const INVALID_PREVIEW: usize = 10;

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let (config, warnings) = args.resolve()?;
    print_input_warnings(&warnings);

    let analysis = run_analysis(&config);

    if let Some(path) = &args.output {
        let file = File::create(path).into_diagnostic()?;
        write_csv(&analysis.records, BufWriter::new(file)).into_diagnostic()?;
        eprintln!(
            "{} Results saved to {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let stdout = io::stdout();
    match effective_format(global.format, true) {
        OutputFormat::Csv => write_csv(&analysis.records, stdout.lock()).into_diagnostic()?,
        OutputFormat::Json => write_json(&report(&analysis), stdout.lock()).into_diagnostic()?,
        OutputFormat::Yaml => write_yaml(&report(&analysis), stdout.lock()).into_diagnostic()?,
        OutputFormat::Table | OutputFormat::Auto => print_report(&analysis, args.limit)?,
    }

    Ok(())
}

fn report(analysis: &FaultAnalysis) -> AnalysisReport<'_> {
    AnalysisReport {
        config: &analysis.config,
        tensor: TensorReport::new(&analysis.tensor),
        summary: &analysis.summary,
        records: &analysis.records,
    }
}

fn print_report(analysis: &FaultAnalysis, limit: usize) -> Result<()> {
    let config = &analysis.config;

    println!("{}", style("Stress parameters").bold());
    println!(
        "   σ1: azimuth {}°, dip {}°",
        config.sigma1.azimuth, config.sigma1.dip
    );
    println!(
        "   σ3: azimuth {}°, dip {}°",
        config.sigma3.azimuth, config.sigma3.dip
    );
    println!("   R (stress ratio): {}", config.stress_ratio);
    match config.seed {
        Some(seed) => println!("   Seed: {}", seed),
        None => println!("   Seed: {}", style("entropy").dim()),
    }
    if analysis.tensor.spec().andersonian {
        println!(
            "   {} Andersonian regime: σ2 is vertical",
            style("⚠").yellow()
        );
    }
    println!();

    print_tensor(&analysis.tensor);
    println!();

    print_validation(&analysis.summary);

    let shown = if limit == 0 {
        analysis.records.len()
    } else {
        limit.min(analysis.records.len())
    };
    println!();
    println!(
        "{} (first {} of {})",
        style("Fault planes").bold(),
        shown,
        analysis.records.len()
    );
    println!("{}", fault_table(analysis.records.iter().take(shown)));
    println!();

    print_statistics(&analysis.summary);
    io::stdout().flush().into_diagnostic()?;
    Ok(())
}

fn print_validation(summary: &AnalysisSummary) {
    if summary.invalid_vectors == 0 {
        println!(
            "{} Vector validation: {}/{} planes correctly defined",
            style("✓").green(),
            summary.valid_vectors(),
            summary.plane_count
        );
    } else {
        println!(
            "{} Vector validation: {}/{} planes correctly defined",
            style("✗").red(),
            summary.valid_vectors(),
            summary.plane_count
        );
        println!(
            "   Invalid planes: {}",
            preview_list(&summary.invalid_planes, INVALID_PREVIEW)
        );
    }
}

fn print_statistics(summary: &AnalysisSummary) {
    println!("{}", style("Statistics").bold());
    if let Some(range) = summary.normal_stress {
        println!(
            "   Normal stress range: {} to {}",
            format_stress(range.min),
            format_stress(range.max)
        );
    }
    if let Some(range) = summary.shear_stress {
        println!(
            "   Shear stress range: {} to {}",
            format_stress(range.min),
            format_stress(range.max)
        );
    }
    if let Some(mean) = summary.mean_rake {
        println!("   Average rake angle: {:.1}°", mean);
    }
    println!("   Movement types:");
    let mut counts: Vec<(&String, &usize)> = summary.movement_counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (code, count) in counts {
        println!("      {:<5} {} planes", code, count);
    }
}
