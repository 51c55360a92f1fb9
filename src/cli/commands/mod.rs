//! CLI command implementations

pub mod analyze;
pub mod completions;
pub mod plane;
pub mod tensor;
