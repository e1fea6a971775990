//! Pipeline configuration
//!
//! All parameterization of the pipeline itself is fixed here: the external
//! tool names, their flags, and the build-tree layout. The configuration
//! record is computed once from the project root and passed explicitly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build-system configure tool, expected on PATH
pub const CONFIGURE_PROGRAM: &str = "cmake";

/// Cache define that switches coverage instrumentation on at configure time
pub const COVERAGE_DEFINE: &str = "-DCOVERAGE=ON";

/// Build tool, expected on PATH
pub const BUILD_PROGRAM: &str = "make";

/// Coverage capture and filter tool, expected on PATH
pub const COVERAGE_TOOL: &str = "lcov";

/// HTML report generator, expected on PATH
pub const REPORT_GENERATOR: &str = "genhtml";

/// Path patterns stripped from captured coverage data: system headers and
/// the vendored test-framework sources
pub const EXCLUDED_PATHS: &[&str] = &["/usr/*", "*/CppUTest/*"];

/// Default name of the test executable under `build/tests/`
pub const DEFAULT_TEST_BINARY: &str = "unit_tests";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Check if debug mode
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Pipeline configuration: the project root and every path derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Project root containing the CMake project
    pub project_dir: PathBuf,
    /// Build directory, recreated on every run
    pub build_dir: PathBuf,
    /// HTML report output directory
    pub report_dir: PathBuf,
    /// Captured coverage data file
    pub capture_file: PathBuf,
    /// Filtered coverage data file
    pub filtered_file: PathBuf,
    /// Name of the test executable under `build/tests/`
    pub test_binary: String,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl PipelineConfig {
    /// Create a configuration rooted at `project_dir`
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let build_dir = project_dir.join("build");
        Self {
            report_dir: build_dir.join("coverage_report"),
            capture_file: build_dir.join("coverage.info"),
            filtered_file: build_dir.join("coverage_clean.info"),
            project_dir,
            build_dir,
            test_binary: DEFAULT_TEST_BINARY.to_string(),
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
        }
    }

    /// Set the test executable name
    #[must_use]
    pub fn with_test_binary(mut self, name: impl Into<String>) -> Self {
        self.test_binary = name.into();
        self
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Directory the test executable lives in and runs from
    #[must_use]
    pub fn test_dir(&self) -> PathBuf {
        self.build_dir.join("tests")
    }

    /// Full path of the test executable
    #[must_use]
    pub fn test_executable(&self) -> PathBuf {
        self.test_dir().join(&self.test_binary)
    }
}
