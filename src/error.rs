use thiserror::Error;

use crate::analysis::AnalysisError;

/// Result alias used throughout the compiler
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing or compiling an expression.
///
/// Every failure is a deterministic function of the input: feeding the same
/// expression again yields the same error.
#[derive(Debug, Error)]
pub enum Error {
    /// The expression does not follow the surface syntax
    #[error("{message}{}", fragment_suffix(.fragment))]
    Syntax {
        message: String,
        /// Offending part of the input, when there is one
        fragment: Option<String>,
    },

    /// The analyzer failed on an operand
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// Request parameters are missing or malformed
    #[error("invalid request: {0}")]
    Config(String),
}

impl Error {
    pub fn syntax(message: impl Into<String>) -> Error {
        Error::Syntax {
            message: message.into(),
            fragment: None,
        }
    }

    pub fn syntax_at(message: impl Into<String>, fragment: impl Into<String>) -> Error {
        Error::Syntax {
            message: message.into(),
            fragment: Some(fragment.into()),
        }
    }

    /// Whether the grammar rejected the input. Analyzer failures are
    /// [`Error::Analysis`] and return `false` here.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    pub fn fragment(&self) -> Option<&str> {
        match self {
            Error::Syntax { fragment, .. } => fragment.as_deref(),
            Error::Analysis(err) => Some(err.text()),
            Error::Config(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

fn fragment_suffix(fragment: &Option<String>) -> String {
    match fragment {
        Some(f) => format!(": \"{}\"", f),
        None => String::new(),
    }
}
