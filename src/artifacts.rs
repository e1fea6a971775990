//! Coverage artifact discovery
//!
//! Instrumented compiles leave `.gcno` note files next to the object files;
//! running the instrumented binary leaves `.gcda` data files. Both kinds
//! must exist somewhere under the build tree before capture is worth
//! attempting.

use crate::error::{PipelineError, PipelineResult};
use std::path::{Path, PathBuf};

/// Glob pattern for compile-time coverage notes
pub const COMPILE_NOTES_PATTERN: &str = "*.gcno";

/// Glob pattern for run-time coverage data
pub const RUNTIME_DATA_PATTERN: &str = "*.gcda";

/// Find files matching `pattern` anywhere under `root`
///
/// Unreadable directory entries are skipped rather than treated as fatal.
pub fn find_artifacts(root: &Path, pattern: &str) -> PipelineResult<Vec<PathBuf>> {
    let expr = root.join("**").join(pattern);
    let paths = glob::glob(&expr.to_string_lossy())
        .map_err(|e| PipelineError::config(format!("Invalid artifact pattern {pattern}: {e}")))?;
    Ok(paths.filter_map(Result::ok).collect())
}

/// Verify that both artifact kinds exist under `build_dir`
///
/// # Errors
///
/// Returns [`PipelineError::MissingArtifacts`] naming the missing kind and
/// the likely cause.
pub fn verify_artifacts(build_dir: &Path) -> PipelineResult<()> {
    if find_artifacts(build_dir, COMPILE_NOTES_PATTERN)?.is_empty() {
        return Err(PipelineError::missing_artifacts(
            "No .gcno files found. Ensure coverage flags are enabled during compilation.",
        ));
    }

    if find_artifacts(build_dir, RUNTIME_DATA_PATTERN)?.is_empty() {
        return Err(PipelineError::missing_artifacts(
            "No .gcda files found. Ensure tests have been run to generate coverage data.",
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_find_artifacts_in_nested_dirs() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("CMakeFiles/app.dir/main.c.gcno"));
        touch(&temp.path().join("tests/CMakeFiles/unit.dir/suite.c.gcno"));

        let found = find_artifacts(temp.path(), COMPILE_NOTES_PATTERN).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_find_artifacts_ignores_other_files() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("main.o"));
        touch(&temp.path().join("main.c.gcda"));

        let found = find_artifacts(temp.path(), COMPILE_NOTES_PATTERN).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_artifacts_empty_tree() {
        let temp = TempDir::new().unwrap();
        let found = find_artifacts(temp.path(), RUNTIME_DATA_PATTERN).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_verify_artifacts_both_present() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("CMakeFiles/app.dir/main.c.gcno"));
        touch(&temp.path().join("CMakeFiles/app.dir/main.c.gcda"));

        assert!(verify_artifacts(temp.path()).is_ok());
    }

    #[test]
    fn test_verify_artifacts_missing_notes() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("CMakeFiles/app.dir/main.c.gcda"));

        let err = verify_artifacts(temp.path()).unwrap_err();
        assert!(err.to_string().contains(".gcno"));
        assert!(err.to_string().contains("coverage flags"));
    }

    #[test]
    fn test_verify_artifacts_missing_data() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("CMakeFiles/app.dir/main.c.gcno"));

        let err = verify_artifacts(temp.path()).unwrap_err();
        assert!(err.to_string().contains(".gcda"));
        assert!(err.to_string().contains("tests have been run"));
    }
}
