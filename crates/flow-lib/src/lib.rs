//! Flow: shape and rank inference for tensor pipelines.
//!
//! # Example
//!
//! ```
//! use flow_lib::ModuleBuilder;
//!
//! let source = r#"
//!     flow add(x)[y] { z = x + y; return z; }
//!     build add main { x => [3, 4]; }
//! "#;
//!
//! let module = ModuleBuilder::new(source).parse().expect("out of fuel").analyze();
//! assert!(module.is_valid());
//! eprintln!("{}", module.diagnostics().render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod check;
pub mod diagnostics;
pub mod infer;
pub mod parser;
pub mod program;
pub mod resolve;
pub mod session;

/// Output of one pass with the diagnostics it produced. `Err` only when a
/// resource limit aborted the pass.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use session::{FailurePolicy, ModuleAnalyzed, ModuleBuilder, ModuleConfig, ModuleParsed};

/// Failures that abort a module outright. Everything else is a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("parser ran out of fuel")]
    ExecFuelExhausted,

    #[error("input is nested too deeply")]
    RecursionLimitExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;
