//! CLI definition using clap

use crate::config::{ColorChoice, DEFAULT_TEST_BINARY};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Cubridor: drive an instrumented C/C++ build and render an lcov HTML
/// coverage report
#[derive(Parser, Debug)]
#[command(name = "cubridor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root containing the CMake project (defaults to the current
    /// directory)
    pub project_dir: Option<PathBuf>,

    /// Name of the test executable expected under build/tests/
    #[arg(long, default_value = DEFAULT_TEST_BINARY)]
    pub test_binary: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorArg,
}

/// Color choice as a CLI argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
