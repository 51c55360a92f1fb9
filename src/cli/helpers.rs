//! Shared helper functions for CLI commands
//!
//! Formatting used by more than one command lives here so that tables,
//! summaries and single-plane reports print numbers the same way.

use console::style;
use nalgebra::Matrix3;

use crate::core::config::InputWarning;
use crate::core::export::round_azimuth;

/// Format an angle in degrees with two decimals
pub fn format_angle(degrees: f64) -> String {
    format!("{:.2}", degrees)
}

/// Format an azimuth with two decimals, wrapping 360.00 to 0.00
pub fn format_azimuth(azimuth: f64) -> String {
    format!("{:.2}", round_azimuth(azimuth, 2))
}

/// Format a stress value with three decimals, avoiding `-0.000`
pub fn format_stress(value: f64) -> String {
    let s = format!("{:.3}", value);
    if s == "-0.000" {
        "0.000".to_string()
    } else {
        s
    }
}

/// Format a unit vector as `(E, N, U)`
pub fn format_vector(v: &[f64; 3]) -> String {
    format!(
        "({}, {}, {})",
        format_stress(v[0]),
        format_stress(v[1]),
        format_stress(v[2])
    )
}

/// Matrix rows as fixed-width lines
pub fn format_matrix(m: &Matrix3<f64>) -> Vec<String> {
    (0..3)
        .map(|i| {
            format!(
                "[{:>7} {:>7} {:>7}]",
                format_stress(m[(i, 0)]),
                format_stress(m[(i, 1)]),
                format_stress(m[(i, 2)])
            )
        })
        .collect()
}

/// Print parameter substitutions to stderr
pub fn print_input_warnings(warnings: &[InputWarning]) {
    for warning in warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
}

/// Show the first `limit` indices, then `...` if there are more
pub fn preview_list(items: &[usize], limit: usize) -> String {
    let shown: Vec<String> = items.iter().take(limit).map(|i| i.to_string()).collect();
    if items.len() > limit {
        format!("[{}, ...]", shown.join(", "))
    } else {
        format!("[{}]", shown.join(", "))
    }
}
