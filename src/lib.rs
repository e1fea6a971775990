//! Cubrir: coverage pipeline driver for CMake projects
//!
//! Drives an instrumented C/C++ build end to end: configure with coverage
//! enabled, build, run the test executable, then capture, filter, and render
//! the coverage data as an HTML report. Every step delegates to an external
//! tool (`cmake`, `make`, the test binary, `lcov`, `genhtml`) and the
//! pipeline stops at the first unrecoverable failure.
//!
//! ## Usage
//!
//! ```bash
//! cubridor                                # pipeline for the current directory
//! cubridor path/to/project               # pipeline for another project
//! cubridor --test-binary ledblink_tests  # non-default test executable name
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod artifacts;
mod commands;
mod config;
mod error;
mod output;
mod pipeline;
mod runner;

pub use artifacts::{
    find_artifacts, verify_artifacts, COMPILE_NOTES_PATTERN, RUNTIME_DATA_PATTERN,
};
pub use commands::{Cli, ColorArg};
pub use config::{
    ColorChoice, PipelineConfig, Verbosity, BUILD_PROGRAM, CONFIGURE_PROGRAM, COVERAGE_DEFINE,
    COVERAGE_TOOL, DEFAULT_TEST_BINARY, EXCLUDED_PATHS, REPORT_GENERATOR,
};
pub use error::{PipelineError, PipelineResult};
pub use output::ProgressReporter;
pub use pipeline::{CoveragePipeline, PipelineReport, StepReport};
pub use runner::{SystemRunner, ToolCommand, ToolRunner, ToolStatus};
