//! Command-line front end for the geometric efficiency engine
//!
//! Collects run parameters (interactively or from a YAML file), runs the distance
//! sweep from `geoeff_core`, prints a live progress table and writes the
//! tab-separated efficiency table.

pub mod logging;
pub mod output;
pub mod params;

pub use logging::init_logging;
pub use output::{format_results, progress_header, progress_row, write_results};
pub use params::{ParamsError, RunParameters, load_parameters, prompt_parameters};
