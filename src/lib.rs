//! paramlint - parameter and documentation linter for C-family sources.
//!
//! paramlint locates function and method definitions without a grammar,
//! then cross-references each definition's parameters against its body and
//! its header comment.
//!
//! # Architecture
//!
//! - `scan`: the grammar-free core (signature locator, body and comment
//!   extraction, parameter names, cross-referencers)
//! - `detect`: file-level checks that turn scan results into violations
//! - `monitor`: per-definition extraction view
//! - `config`: YAML configuration schema
//! - `source`: file collection and decoding
//! - `report`: output formatting (pretty, JSON, SARIF)
//!
//! # Example
//!
//! ```
//! use paramlint::scan::{find_unused_parameters, DefinitionScanner};
//!
//! let text = "int add(int a, int b) { return a; }";
//! let record = DefinitionScanner::new(text).next().unwrap();
//! let unused: Vec<_> = find_unused_parameters(&record).into_iter().collect();
//! assert_eq!(unused, vec!["b"]);
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod logging;
pub mod monitor;
pub mod report;
pub mod scan;
pub mod source;

pub use config::Config;
pub use detect::{DetectionResult, Runner, Violation};
pub use monitor::{FileMonitor, MethodEntry, Monitor};
pub use scan::{DefinitionMatch, DefinitionScanner, FunctionRecord};
