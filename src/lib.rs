pub use crate::annotations::TestAnnotations;
pub use crate::config::{RunConfig, RunProfile};
pub use crate::errors::HarnessError;
pub use crate::outcome::{Evaluation, Outcome};

pub mod annotations;
pub mod cli;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod exec;
pub mod outcome;
pub mod report;
