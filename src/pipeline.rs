//! Coverage pipeline implementation
//!
//! A fixed sequence of steps, each delegating to an external tool, stopping
//! at the first unrecoverable failure. Steps share one immutable
//! [`PipelineConfig`] passed in at construction.

use crate::artifacts;
use crate::config::{
    PipelineConfig, BUILD_PROGRAM, CONFIGURE_PROGRAM, COVERAGE_DEFINE, COVERAGE_TOOL,
    EXCLUDED_PATHS, REPORT_GENERATOR,
};
use crate::error::{PipelineError, PipelineResult};
use crate::output::ProgressReporter;
use crate::runner::{SystemRunner, ToolCommand, ToolRunner};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::{Duration, Instant};

/// Outcome of a single pipeline step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// Step name
    pub name: String,
    /// Whether a command failure was ignored during the step
    pub warned: bool,
    /// Step duration
    pub duration: Duration,
}

impl StepReport {
    /// Record a step that completed cleanly
    #[must_use]
    pub fn completed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            warned: false,
            duration,
        }
    }

    /// Record a step whose command failure was ignored
    #[must_use]
    pub fn warned(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            warned: true,
            duration,
        }
    }
}

/// Aggregated outcome of a full pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Individual step outcomes
    pub steps: Vec<StepReport>,
    /// Total duration
    pub duration: Duration,
}

impl PipelineReport {
    /// Create new empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step outcome
    pub fn add(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    /// Number of steps that ran
    #[must_use]
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    /// Number of steps that continued past an ignored command failure
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.steps.iter().filter(|s| s.warned).count()
    }
}

/// Drives the coverage pipeline against a [`ToolRunner`]
///
/// The default runner shells out to the real toolchain; tests substitute a
/// scripted fake.
#[derive(Debug)]
pub struct CoveragePipeline<R = SystemRunner> {
    config: PipelineConfig,
    runner: R,
    reporter: ProgressReporter,
}

impl CoveragePipeline {
    /// Create a pipeline that runs the real toolchain
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ToolRunner> CoveragePipeline<R> {
    /// Create a pipeline over a custom tool runner
    #[must_use]
    pub fn with_runner(config: PipelineConfig, runner: R) -> Self {
        let reporter =
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
        Self {
            config,
            runner,
            reporter,
        }
    }

    /// Execute every step in order, stopping at the first fatal failure
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: a non-ignored tool failure, a tool
    /// that cannot be spawned, a missing test executable, missing coverage
    /// artifacts, or a filesystem error while resetting the build directory.
    pub fn run(&mut self) -> PipelineResult<PipelineReport> {
        let start = Instant::now();
        let mut report = PipelineReport::new();

        let steps: [(&str, bool, fn(&mut Self) -> PipelineResult<()>); 8] = [
            ("clean", false, Self::reset_build_dir),
            ("configure", false, Self::configure),
            ("build", false, Self::build),
            ("test", false, Self::run_test_binary),
            ("verify-artifacts", false, Self::verify_artifacts),
            ("capture", false, Self::capture_coverage),
            ("filter", false, Self::filter_coverage),
            ("render", false, Self::render_html),
        ];

        for (name, ignore_failure, step) in steps {
            self.run_step(&mut report, name, ignore_failure, step)?;
        }

        report.duration = start.elapsed();

        self.reporter
            .success("Coverage report generated successfully.");
        self.reporter.info(&format!(
            "Open the report using: xdg-open {}",
            self.config.report_dir.join("index.html").display()
        ));

        Ok(report)
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get the reporter (for testing)
    #[must_use]
    pub const fn reporter(&self) -> &ProgressReporter {
        &self.reporter
    }

    /// Run one step, honoring the ignore-failure flag for command failures
    ///
    /// Only external-command failures are ignorable; missing files and IO
    /// errors abort the run regardless of the flag.
    fn run_step(
        &mut self,
        report: &mut PipelineReport,
        name: &str,
        ignore_failure: bool,
        step: fn(&mut Self) -> PipelineResult<()>,
    ) -> PipelineResult<()> {
        let start = Instant::now();
        match step(self) {
            Ok(()) => {
                report.add(StepReport::completed(name, start.elapsed()));
                Ok(())
            }
            Err(PipelineError::Tool { message }) if ignore_failure => {
                self.reporter.warning(&message);
                report.add(StepReport::warned(name, start.elapsed()));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Invoke one external tool and translate a non-zero exit into an error
    fn dispatch(&mut self, command: &ToolCommand) -> PipelineResult<()> {
        let line = match (&command.cwd, self.config.verbosity.is_verbose()) {
            (Some(dir), true) => {
                format!("Running: {} (in {})", command.command_line(), dir.display())
            }
            _ => format!("Running: {}", command.command_line()),
        };
        self.reporter.info(&line);

        let status = self.runner.run(command)?;
        if status.success {
            return Ok(());
        }

        Err(PipelineError::tool(match status.code {
            Some(code) => format!("{} exited with status {code}", command.program),
            None => format!("{} was terminated by a signal", command.program),
        }))
    }

    fn reset_build_dir(&mut self) -> PipelineResult<()> {
        self.reporter.header("Cleaning build directory");
        if self.config.build_dir.exists() {
            fs::remove_dir_all(&self.config.build_dir)?;
        }
        fs::create_dir_all(&self.config.build_dir)?;
        Ok(())
    }

    fn configure(&mut self) -> PipelineResult<()> {
        self.reporter.header("Configuring the project");
        let command = ToolCommand::new(CONFIGURE_PROGRAM)
            .arg(COVERAGE_DEFINE)
            .arg("..")
            .current_dir(&self.config.build_dir);
        self.dispatch(&command)
    }

    fn build(&mut self) -> PipelineResult<()> {
        self.reporter.header("Building the project");
        let command = ToolCommand::new(BUILD_PROGRAM).current_dir(&self.config.build_dir);
        self.dispatch(&command)
    }

    fn run_test_binary(&mut self) -> PipelineResult<()> {
        self.reporter.header("Running tests");
        let executable = self.config.test_executable();
        if !executable.exists() {
            return Err(PipelineError::missing_executable(executable));
        }

        // The instrumented binary drops its .gcda files relative to its
        // working directory, so run it from its own folder.
        let command = ToolCommand::new(executable.to_string_lossy())
            .current_dir(self.config.test_dir());
        self.dispatch(&command)
    }

    fn verify_artifacts(&mut self) -> PipelineResult<()> {
        self.reporter.header("Checking coverage files");
        artifacts::verify_artifacts(&self.config.build_dir)
    }

    fn capture_coverage(&mut self) -> PipelineResult<()> {
        self.reporter.header("Generating coverage report");
        let command = ToolCommand::new(COVERAGE_TOOL)
            .args(["--capture", "--directory", "."])
            .arg("--output-file")
            .arg(self.config.capture_file.to_string_lossy())
            .args(["--ignore-errors", "inconsistent"])
            .current_dir(&self.config.build_dir);
        self.dispatch(&command)
    }

    fn filter_coverage(&mut self) -> PipelineResult<()> {
        let command = ToolCommand::new(COVERAGE_TOOL)
            .arg("--remove")
            .arg(self.config.capture_file.to_string_lossy())
            .args(EXCLUDED_PATHS.iter().copied())
            .arg("--output-file")
            .arg(self.config.filtered_file.to_string_lossy())
            .current_dir(&self.config.build_dir);
        self.dispatch(&command)
    }

    fn render_html(&mut self) -> PipelineResult<()> {
        let command = ToolCommand::new(REPORT_GENERATOR)
            .arg(self.config.filtered_file.to_string_lossy())
            .arg("--output-directory")
            .arg(self.config.report_dir.to_string_lossy())
            .current_dir(&self.config.build_dir);
        self.dispatch(&command)
    }
}
