#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Options for a single run.
pub mod config;
/// Direction detection and output naming.
pub mod direction;
/// Pipeline failures.
pub mod error;
/// Process exit codes shared with the command-line front end.
pub mod exit_code;
mod orchestrator;
/// Outcome of a run.
pub mod result;

pub use config::PipelineConfig;
pub use direction::{DECOMPRESSED_SUFFIX, Direction, ZST_SUFFIX};
pub use error::PipelineError;
pub use exit_code::ExitCode;
pub use orchestrator::run;
pub use result::{Benefit, PipelineResult};
