#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front end of `zpipe`. It parses the
//! argument vector with a [`clap`](https://docs.rs/clap/) builder command,
//! installs the `tracing` subscriber for the requested verbosity, hands the
//! named file to [`pipeline::run`], and renders the outcome as a boxed text
//! report or as JSON.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error so tests can drive it without spawning a process. Reports
//! go to standard output; diagnostics go to standard error.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Exit codes come from [`pipeline::ExitCode`]; argument errors use `1`.
//! - `--json` always writes exactly one JSON document to standard output, for
//!   failures as well as successes.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["zpipe", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("zpipe "));
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - `src/bin/zpipe.rs` for the binary that wires [`run`] into `main`.

mod frontend;

pub use frontend::{exit_code_from, run};
