#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the command-line verbosity flags into a `tracing`
//! subscriber. Library crates emit events with the `tracing` macros under
//! `zpipe::<area>` targets and never install a subscriber themselves; the
//! binary calls [`init_tracing`] once at start-up.
//!
//! # Examples
//!
//! ```
//! use logging::{Verbosity, VerbosityConfig};
//!
//! let config = VerbosityConfig::from_flags(false, 2);
//! assert_eq!(config.verbosity, Verbosity::Debug);
//! ```

mod config;
mod tracing_bridge;

pub use config::{Verbosity, VerbosityConfig};
pub use tracing_bridge::{LOG_ENV, build_filter, filter_directives, init_tracing};
