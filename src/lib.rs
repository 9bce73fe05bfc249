//! # proxq - Proximity query compiler
//!
//! proxq turns a small surface syntax for word proximity and capitalization
//! constraints into span/boolean query trees that a span-capable inverted
//! index can execute.
//!
//! ## Syntax
//!
//! - `quick fox w5 dog` - `fox` followed by `dog` within 5 positions
//! - `"lazy dog" n3 cat` - the phrase and `cat` within 3 positions, any order
//! - `firstcap(trump)` - `trump` indexed with a leading capital only
//!
//! ## Architecture
//!
//! - [`analysis`] - Analyzer boundary, built-in analyzers, capitalization classes
//! - [`query`] - Expression grammar, query tree types and the compilers
//! - [`config`] - Request parameters (`qf`, `mm`, mode) and JSON requests
//! - [`output`] - Terminal rendering of compiled trees
//!
//! ## Quick Start
//!
//! ```
//! use proxq::analysis::StandardAnalyzer;
//! use proxq::query::{compile_proximity, CompileMode};
//!
//! let query = compile_proximity(
//!     "title",
//!     "Brown Fox w4 Dog",
//!     &StandardAnalyzer,
//!     CompileMode::LooseTerms,
//!     100,
//! )
//! .unwrap();
//! assert_eq!(query.to_string(), "(title:brown spanNear([title:fox, title:dog], 4, true))~2");
//! ```
//!
//! Compilation is stateless: every call parses and builds a fresh tree, so
//! the entry points can be used from any number of threads at once.

pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod query;

pub use error::{Error, Result};
