//! Defines the command-line arguments and subcommands for the abitest CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "abitest",
    version,
    about = "A compile-and-run conformance harness for C++ ABI test suites."
)]
pub struct AbitestArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile and run the given test sources, reporting PASS/FAIL/UNSUPPORTED.
    Run {
        /// Test source files to evaluate. Files are listed explicitly;
        /// directory discovery belongs to the calling framework.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Compiler executable (defaults to $CXX, then `c++`).
        #[arg(long)]
        cxx: Option<PathBuf>,
        /// Compile-time flag, repeatable.
        #[arg(short = 'c', long = "compile-flag", value_name = "FLAG", allow_hyphen_values = true)]
        compile_flags: Vec<String>,
        /// Link-time flag, repeatable.
        #[arg(short = 'l', long = "link-flag", value_name = "FLAG", allow_hyphen_values = true)]
        link_flags: Vec<String>,
        /// Feature tag available in this run, repeatable.
        #[arg(short = 'f', long = "feature", value_name = "TAG")]
        features: Vec<String>,
        /// Environment assignment for the test binary, repeatable.
        #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_assignment)]
        env: Vec<(String, String)>,
        /// Memory-checker wrapper argument, prepended to the run command;
        /// repeat to build the full wrapper invocation.
        #[arg(long = "memcheck", value_name = "ARG")]
        memcheck: Vec<String>,
        /// YAML run profile merged into the configuration.
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Print the annotations scanned from a test source's leading comment block.
    Annotations {
        /// The test source file to scan.
        #[arg(required = true)]
        file: PathBuf,
    },
}

fn parse_env_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}
