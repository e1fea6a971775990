//! Output formatting and progress reporting

use console::{style, Term};

/// Progress reporter for pipeline execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        // Always print warnings, even in quiet mode
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a step header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(format!("{title}...")).bold().to_string()
        } else {
            format!("{title}...")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reporter() {
        let reporter = ProgressReporter::new(true, false);
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_default_reporter() {
        let reporter = ProgressReporter::default();
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }

    #[test]
    fn test_success_message() {
        let reporter = ProgressReporter::new(false, false);
        reporter.success("report generated");
        // No panic = success
    }

    #[test]
    fn test_warning_message() {
        let reporter = ProgressReporter::new(false, false);
        reporter.warning("command failed");
        // No panic = success
    }

    #[test]
    fn test_info_message() {
        let reporter = ProgressReporter::new(false, false);
        reporter.info("Running: make");
        // No panic = success
    }

    #[test]
    fn test_header() {
        let reporter = ProgressReporter::new(false, false);
        reporter.header("Building the project");
        // No panic = success
    }

    #[test]
    fn test_quiet_mode_suppresses_output() {
        let reporter = ProgressReporter::new(false, true);
        reporter.success("hidden");
        reporter.info("hidden");
        reporter.header("hidden");
        // Warnings are still printed
        reporter.warning("shown");
        // No panic = success
    }
}
