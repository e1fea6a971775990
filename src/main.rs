//! Cubridor: CLI entry point for the coverage pipeline
//!
//! ## Usage
//!
//! ```bash
//! cubridor                                # run in the current directory
//! cubridor path/to/project -v            # verbose run elsewhere
//! cubridor --test-binary ledblink_tests  # non-default test executable
//! ```

use clap::Parser;
use cubrir::{Cli, CoveragePipeline, PipelineConfig, PipelineError, PipelineResult, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> PipelineResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let mut pipeline = CoveragePipeline::new(config);
    pipeline.run().map(|_| ())
}

fn build_config(cli: &Cli) -> PipelineResult<PipelineConfig> {
    let project_dir = match cli.project_dir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    // Resolve to an absolute path once; every other path derives from it.
    let project_dir = std::fs::canonicalize(&project_dir).map_err(|e| {
        PipelineError::config(format!(
            "Invalid project directory {}: {e}",
            project_dir.display()
        ))
    })?;

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    Ok(PipelineConfig::new(project_dir)
        .with_test_binary(cli.test_binary.clone())
        .with_verbosity(verbosity)
        .with_color(cli.color.into()))
}
