//! Run configuration: the resolved compiler, flags, environment overlay,
//! and available-feature set for one harness run.
//!
//! The harness does no flag derivation or platform detection of its own.
//! Everything here is taken verbatim from the caller: command-line options,
//! an optional YAML profile, and the `CXX` environment variable as the
//! default compiler.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::HarnessError;

/// The resolved configuration a test is evaluated against.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Compiler executable; defaults to `$CXX`, then `c++`.
    pub cxx: PathBuf,
    pub compile_flags: Vec<String>,
    pub link_flags: Vec<String>,
    /// Extra environment variables injected into the executed test binary.
    pub exec_env: Vec<(String, String)>,
    /// Feature tags describing the current run environment, supplied by the
    /// caller; gating compares test annotations against this set.
    pub available_features: BTreeSet<String>,
    /// Memory-checker wrapper argv, prepended to the run command when set.
    pub memcheck: Option<Vec<String>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cxx: default_cxx(),
            compile_flags: Vec::new(),
            link_flags: Vec::new(),
            exec_env: Vec::new(),
            available_features: BTreeSet::new(),
            memcheck: None,
        }
    }
}

fn default_cxx() -> PathBuf {
    env::var_os("CXX")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("c++"))
}

/// A partial configuration loaded from a YAML profile file. Unset fields
/// leave the current configuration untouched; list fields are appended.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunProfile {
    pub cxx: Option<PathBuf>,
    #[serde(default)]
    pub compile_flags: Vec<String>,
    #[serde(default)]
    pub link_flags: Vec<String>,
    #[serde(default)]
    pub exec_env: BTreeMap<String, String>,
    #[serde(default)]
    pub available_features: BTreeSet<String>,
    pub memcheck: Option<Vec<String>>,
}

impl RunProfile {
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = fs::read_to_string(path).map_err(|source| HarnessError::ProfileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| HarnessError::ProfileParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl RunConfig {
    /// Merges a profile into this configuration.
    pub fn apply_profile(&mut self, profile: RunProfile) {
        if let Some(cxx) = profile.cxx {
            self.cxx = cxx;
        }
        self.compile_flags.extend(profile.compile_flags);
        self.link_flags.extend(profile.link_flags);
        self.exec_env.extend(profile.exec_env);
        self.available_features.extend(profile.available_features);
        if let Some(memcheck) = profile.memcheck {
            self.memcheck = Some(memcheck);
        }
    }
}
