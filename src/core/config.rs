//! Analysis configuration
//!
//! Parameters come from an optional YAML file and from command-line flags.
//! Both are collected as [`RawParameters`], whose values may be numbers or
//! strings, and resolved once into an [`AnalysisConfig`]. Resolution never
//! fails: bad values are replaced by their defaults or clamped, and each
//! substitution is returned as an [`InputWarning`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::core::geometry::Orientation;
use crate::core::stress::{StressSpec, DEFAULT_STRESS_RATIO};

pub const DEFAULT_SIGMA1: Orientation = Orientation {
    azimuth: 45.0,
    dip: 30.0,
};
pub const DEFAULT_SIGMA3: Orientation = Orientation {
    azimuth: 315.0,
    dip: 0.0,
};
pub const DEFAULT_FAULT_COUNT: usize = 50;
pub const DEFAULT_SEED: u64 = 42;
/// Dips below this many degrees count as horizontal for the Andersonian check
pub const DEFAULT_ANDERSONIAN_TOLERANCE: f64 = 1e-6;

/// Largest seed a YAML number can carry exactly; bigger seeds must be quoted
const MAX_EXACT_SEED: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

/// Validated parameters for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub sigma1: Orientation,
    pub sigma3: Orientation,
    /// Stress ratio R in [0, 1]
    pub stress_ratio: f64,
    /// Number of fault planes to sample, at least 1
    pub fault_count: usize,
    /// Fixed seed for reproducible runs; `None` uses OS entropy
    pub seed: Option<u64>,
    pub andersonian_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sigma1: DEFAULT_SIGMA1,
            sigma3: DEFAULT_SIGMA3,
            stress_ratio: DEFAULT_STRESS_RATIO,
            fault_count: DEFAULT_FAULT_COUNT,
            seed: Some(DEFAULT_SEED),
            andersonian_tolerance: DEFAULT_ANDERSONIAN_TOLERANCE,
        }
    }
}

impl AnalysisConfig {
    /// True when both σ1 and σ3 are horizontal within the configured tolerance
    pub fn is_andersonian(&self) -> bool {
        crate::core::stress::is_andersonian(self.sigma1, self.sigma3, self.andersonian_tolerance)
    }

    /// Stress tensor input derived from this config
    pub fn stress_spec(&self) -> StressSpec {
        StressSpec::with_derived_regime(
            self.sigma1,
            self.sigma3,
            self.stress_ratio,
            self.andersonian_tolerance,
        )
    }
}

/// A parameter value as given by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    /// Any other YAML shape (bool, list, map); always resolves to the default
    Other(serde_yml::Value),
}

impl RawValue {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
            RawValue::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    fn as_count(&self) -> Option<usize> {
        match self {
            RawValue::Number(n) if n.fract() == 0.0 && *n >= 1.0 && *n <= usize::MAX as f64 => {
                Some(*n as usize)
            }
            RawValue::Number(_) => None,
            RawValue::Text(s) => s.trim().parse::<usize>().ok().filter(|n| *n >= 1),
            RawValue::Other(_) => None,
        }
    }

    fn as_seed(&self) -> Option<u64> {
        match self {
            // Integers above 2^53 do not survive the trip through f64
            RawValue::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= MAX_EXACT_SEED => {
                Some(*n as u64)
            }
            RawValue::Number(_) => None,
            RawValue::Text(s) => s.trim().parse::<u64>().ok(),
            RawValue::Other(_) => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "{:?}", s),
            RawValue::Other(v) => {
                let yaml = serde_yml::to_string(v).map_err(|_| std::fmt::Error)?;
                write!(f, "{}", yaml.trim_end())
            }
        }
    }
}

/// Parameters before validation, all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParameters {
    pub sigma1_azimuth: Option<RawValue>,
    pub sigma1_dip: Option<RawValue>,
    pub sigma3_azimuth: Option<RawValue>,
    pub sigma3_dip: Option<RawValue>,
    pub stress_ratio: Option<RawValue>,
    pub fault_count: Option<RawValue>,
    pub seed: Option<RawValue>,
    pub andersonian_tolerance: Option<RawValue>,
}

/// A value that was replaced or adjusted during resolution
#[derive(Debug, Clone, PartialEq)]
pub enum InputWarning {
    /// Not a finite number; the default was used
    Invalid {
        field: &'static str,
        value: String,
        default: String,
    },
    /// Outside its allowed range; clamped
    Clamped {
        field: &'static str,
        value: f64,
        clamped: f64,
    },
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputWarning::Invalid {
                field,
                value,
                default,
            } => write!(f, "{}: invalid value {}, using default {}", field, value, default),
            InputWarning::Clamped {
                field,
                value,
                clamped,
            } => write!(f, "{}: {} is out of range, clamped to {}", field, value, clamped),
        }
    }
}

impl RawParameters {
    /// Load parameters from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content)
    }

    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: RawParameters) -> Self {
        Self {
            sigma1_azimuth: other.sigma1_azimuth.or(self.sigma1_azimuth),
            sigma1_dip: other.sigma1_dip.or(self.sigma1_dip),
            sigma3_azimuth: other.sigma3_azimuth.or(self.sigma3_azimuth),
            sigma3_dip: other.sigma3_dip.or(self.sigma3_dip),
            stress_ratio: other.stress_ratio.or(self.stress_ratio),
            fault_count: other.fault_count.or(self.fault_count),
            seed: other.seed.or(self.seed),
            andersonian_tolerance: other.andersonian_tolerance.or(self.andersonian_tolerance),
        }
    }

    /// Validate into a config, reporting every substitution
    pub fn resolve(&self) -> (AnalysisConfig, Vec<InputWarning>) {
        let mut warnings = Vec::new();
        let defaults = AnalysisConfig::default();

        let mut number = |field: &'static str, raw: &Option<RawValue>, default: f64| -> f64 {
            match raw {
                None => default,
                Some(value) => value.as_f64().unwrap_or_else(|| {
                    warnings.push(InputWarning::Invalid {
                        field,
                        value: value.to_string(),
                        default: default.to_string(),
                    });
                    default
                }),
            }
        };

        let sigma1 = Orientation::new(
            number("sigma1_azimuth", &self.sigma1_azimuth, DEFAULT_SIGMA1.azimuth),
            number("sigma1_dip", &self.sigma1_dip, DEFAULT_SIGMA1.dip),
        );
        let sigma3 = Orientation::new(
            number("sigma3_azimuth", &self.sigma3_azimuth, DEFAULT_SIGMA3.azimuth),
            number("sigma3_dip", &self.sigma3_dip, DEFAULT_SIGMA3.dip),
        );
        let ratio = number("stress_ratio", &self.stress_ratio, DEFAULT_STRESS_RATIO);
        let tolerance = number(
            "andersonian_tolerance",
            &self.andersonian_tolerance,
            DEFAULT_ANDERSONIAN_TOLERANCE,
        )
        .abs();

        let stress_ratio = ratio.clamp(0.0, 1.0);
        if stress_ratio != ratio {
            warnings.push(InputWarning::Clamped {
                field: "stress_ratio",
                value: ratio,
                clamped: stress_ratio,
            });
        }

        let fault_count = match &self.fault_count {
            None => DEFAULT_FAULT_COUNT,
            Some(value) => value.as_count().unwrap_or_else(|| {
                warnings.push(InputWarning::Invalid {
                    field: "fault_count",
                    value: value.to_string(),
                    default: DEFAULT_FAULT_COUNT.to_string(),
                });
                DEFAULT_FAULT_COUNT
            }),
        };

        let seed = match &self.seed {
            None => defaults.seed,
            Some(value) => Some(value.as_seed().unwrap_or_else(|| {
                warnings.push(InputWarning::Invalid {
                    field: "seed",
                    value: value.to_string(),
                    default: DEFAULT_SEED.to_string(),
                });
                DEFAULT_SEED
            })),
        };

        for warning in &warnings {
            warn!("{}", warning);
        }

        let config = AnalysisConfig {
            sigma1,
            sigma3,
            stress_ratio,
            fault_count,
            seed,
            andersonian_tolerance: tolerance,
        };
        (config, warnings)
    }
}
