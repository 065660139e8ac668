//! The abitest command-line interface.
//!
//! This is a minimal driver front-end over the evaluator: it assembles a
//! [`RunConfig`] from options and an optional YAML profile, evaluates each
//! listed file, and reports. Test discovery and scheduling stay with the
//! calling framework.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use crate::cli::args::{AbitestArgs, Command};
use crate::config::{RunConfig, RunProfile};
use crate::errors::HarnessError;
use crate::evaluator;
use crate::report::{self, ReportStyle};
use crate::TestAnnotations;

pub mod args;

/// The main entry point for the CLI.
pub fn run() -> Result<(), HarnessError> {
    let args = AbitestArgs::parse();
    match args.command {
        Command::Run {
            files,
            cxx,
            compile_flags,
            link_flags,
            features,
            env,
            memcheck,
            profile,
        } => {
            let mut config = RunConfig::default();
            if let Some(path) = profile {
                config.apply_profile(RunProfile::load(&path)?);
            }
            if let Some(cxx) = cxx {
                config.cxx = cxx;
            }
            config.compile_flags.extend(compile_flags);
            config.link_flags.extend(link_flags);
            config.available_features.extend(features);
            config.exec_env.extend(env);
            if !memcheck.is_empty() {
                config.memcheck = Some(memcheck);
            }
            handle_run(&files, &config)
        }
        Command::Annotations { file } => handle_annotations(&file),
    }
}

/// Evaluates each file in order and reports. Exits non-zero when any test
/// failed; an infrastructure error aborts the run and propagates.
fn handle_run(files: &[PathBuf], config: &RunConfig) -> Result<(), HarnessError> {
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let evaluation = evaluator::evaluate(file, config)?;
        results.push((file.display().to_string(), evaluation));
    }

    let style = ReportStyle::default();
    let (_, failed, _) = report::report_results(&results, &style);
    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}

/// Handles the `annotations` subcommand.
fn handle_annotations(file: &Path) -> Result<(), HarnessError> {
    let source = fs::read_to_string(file).map_err(|source| HarnessError::SourceRead {
        path: file.to_path_buf(),
        source,
    })?;
    let annotations = TestAnnotations::scan(&source);
    println!("REQUIRES: {}", annotations.requires.join(", "));
    println!("UNSUPPORTED: {}", annotations.unsupported.join(", "));
    println!("XFAIL: {}", annotations.xfail.join(", "));
    Ok(())
}
