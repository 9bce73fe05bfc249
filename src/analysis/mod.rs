//! Term analysis boundary.
//!
//! The compiler never tokenizes text itself. It hands operand text to a
//! [`TermAnalyzer`] and works with the ordered terms that come back.
//!
//! ## Modules
//!
//! - [`tokenizer`] - Built-in analyzers used by the CLI and tests
//! - [`capitalization`] - Capitalization classes and their payload codes

pub mod capitalization;
pub mod tokenizer;

pub use capitalization::CapitalizationClass;
pub use tokenizer::{StandardAnalyzer, WhitespaceAnalyzer};

use log::debug;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a [`TermAnalyzer`]
#[derive(Debug, Error)]
#[error("cannot analyze \"{text}\" for field {field}: {source}")]
pub struct AnalysisError {
    field: String,
    text: String,
    #[source]
    source: BoxedSource,
}

impl AnalysisError {
    pub fn new(
        field: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<BoxedSource>,
    ) -> AnalysisError {
        AnalysisError {
            field: field.into(),
            text: text.into(),
            source: source.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Maps raw text for a field to its ordered sequence of normalized terms.
///
/// Implementations must be callable from several threads at once.
pub trait TermAnalyzer: Send + Sync {
    fn analyze(&self, field: &str, text: &str) -> Result<Vec<String>, AnalysisError>;
}

impl<F> TermAnalyzer for F
where
    F: Fn(&str, &str) -> Result<Vec<String>, AnalysisError> + Send + Sync,
{
    fn analyze(&self, field: &str, text: &str) -> Result<Vec<String>, AnalysisError> {
        self(field, text)
    }
}

/// Run the analyzer and log what it produced
pub(crate) fn analyze_terms(
    analyzer: &dyn TermAnalyzer,
    field: &str,
    text: &str,
) -> Result<Vec<String>, AnalysisError> {
    let terms = analyzer.analyze(field, text)?;
    debug!("analyzed {:?} on {} -> {:?}", text, field, terms);
    Ok(terms)
}

/// Look up a built-in analyzer by name
pub fn for_name(name: &str) -> Option<Box<dyn TermAnalyzer>> {
    match name {
        "standard" => Some(Box::new(StandardAnalyzer)),
        "whitespace" => Some(Box::new(WhitespaceAnalyzer)),
        _ => None,
    }
}
