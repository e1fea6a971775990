//! External tool invocation
//!
//! Every step that shells out goes through the [`ToolRunner`] trait so the
//! orchestration can be tested against a scripted fake instead of a real
//! toolchain.

use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An external tool invocation: program, arguments, optional working directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    /// Program name or path
    pub program: String,
    /// Argument list
    pub args: Vec<String>,
    /// Working directory for the invocation
    pub cwd: Option<PathBuf>,
}

impl ToolCommand {
    /// Create an invocation of `program` with no arguments
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Render the invocation as a single command line for log output
    #[must_use]
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Observed result of a completed tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStatus {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Raw exit code, if the process exited normally
    pub code: Option<i32>,
}

impl ToolStatus {
    /// Status of a successful invocation
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// Status of an invocation that exited with `code`
    #[must_use]
    pub const fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

/// Runs external tools and reports their exit status
pub trait ToolRunner {
    /// Invoke `command` and wait for it to complete
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned at all. A process
    /// that runs and exits non-zero is a `Ok(ToolStatus)` with `success`
    /// false; the caller decides whether that is fatal.
    fn run(&mut self, command: &ToolCommand) -> PipelineResult<ToolStatus>;
}

/// [`ToolRunner`] over `std::process` with inherited stdio, waiting for
/// completion before returning
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&mut self, command: &ToolCommand) -> PipelineResult<ToolStatus> {
        let mut cmd = std::process::Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(ref dir) = command.cwd {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|e| {
            PipelineError::tool(format!(
                "Failed to execute {}: {e}. Is it installed?",
                command.program
            ))
        })?;

        Ok(ToolStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod tool_command_tests {
        use super::*;

        #[test]
        fn test_builder() {
            let cmd = ToolCommand::new("cmake")
                .arg("-DCOVERAGE=ON")
                .arg("..")
                .current_dir("/proj/build");
            assert_eq!(cmd.program, "cmake");
            assert_eq!(cmd.args, vec!["-DCOVERAGE=ON", ".."]);
            assert_eq!(cmd.cwd, Some(PathBuf::from("/proj/build")));
        }

        #[test]
        fn test_args_extend() {
            let cmd = ToolCommand::new("lcov").args(["--capture", "--directory", "."]);
            assert_eq!(cmd.args.len(), 3);
        }

        #[test]
        fn test_command_line_no_args() {
            assert_eq!(ToolCommand::new("make").command_line(), "make");
        }

        #[test]
        fn test_command_line_with_args() {
            let cmd = ToolCommand::new("cmake").arg("-DCOVERAGE=ON").arg("..");
            assert_eq!(cmd.command_line(), "cmake -DCOVERAGE=ON ..");
        }

        #[test]
        fn test_serialize() {
            let cmd = ToolCommand::new("genhtml").arg("coverage_clean.info");
            let json = serde_json::to_string(&cmd).unwrap();
            assert!(json.contains("genhtml"));
        }
    }

    mod tool_status_tests {
        use super::*;

        #[test]
        fn test_ok() {
            let status = ToolStatus::ok();
            assert!(status.success);
            assert_eq!(status.code, Some(0));
        }

        #[test]
        fn test_failed() {
            let status = ToolStatus::failed(2);
            assert!(!status.success);
            assert_eq!(status.code, Some(2));
        }
    }

    mod system_runner_tests {
        use super::*;

        #[test]
        fn test_missing_program_is_an_error() {
            let mut runner = SystemRunner;
            let cmd = ToolCommand::new("definitely-not-a-real-tool-xyz");
            let err = runner.run(&cmd).unwrap_err();
            assert!(err.to_string().contains("Failed to execute"));
        }

        #[cfg(unix)]
        #[test]
        fn test_successful_invocation() {
            let mut runner = SystemRunner;
            let status = runner.run(&ToolCommand::new("true")).unwrap();
            assert!(status.success);
        }

        #[cfg(unix)]
        #[test]
        fn test_failing_invocation_is_not_an_error() {
            let mut runner = SystemRunner;
            let status = runner.run(&ToolCommand::new("false")).unwrap();
            assert!(!status.success);
            assert_eq!(status.code, Some(1));
        }
    }
}
