//! Shared analyzers and request files for integration tests.

#![allow(dead_code)]

use proxq::analysis::{AnalysisError, TermAnalyzer};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

pub const FIELD: &str = "title";

/// Lowercases and splits on whitespace, nothing else
pub struct LowercaseAnalyzer;

impl TermAnalyzer for LowercaseAnalyzer {
    fn analyze(&self, _field: &str, text: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(text
            .split_whitespace()
            .map(|t| t.trim_matches('"').to_lowercase())
            .filter(|t| !t.is_empty())
            .collect())
    }
}

/// Fails on any text containing `boom`, like an analyzer whose
/// dictionary lookup breaks
pub struct FlakyAnalyzer;

impl TermAnalyzer for FlakyAnalyzer {
    fn analyze(&self, field: &str, text: &str) -> Result<Vec<String>, AnalysisError> {
        if text.contains("boom") {
            return Err(AnalysisError::new(field, text, "synonym dictionary unavailable"));
        }
        LowercaseAnalyzer.analyze(field, text)
    }
}

static REQUEST_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Directory holding sample request documents (created once per run)
pub fn request_dir() -> PathBuf {
    REQUEST_DIR.get_or_init(create_request_dir).clone()
}

fn create_request_dir() -> PathBuf {
    let dir = std::env::temp_dir()
        .join("proxq_test_fixtures")
        .join(format!("test_{}", std::process::id()));

    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create fixture dir");

    fs::write(
        dir.join("loose.json"),
        r#"{"parser": "proximity", "q": "Quick Brown Fox w4 Lazy Dog", "qf": "title", "mm": "50%"}"#,
    )
    .unwrap();

    fs::write(
        dir.join("phrase.json"),
        r#"{"parser": "proximity", "q": "\"cat kitty\" n10 dog doggy", "qf": "title", "mode": "phrase"}"#,
    )
    .unwrap();

    fs::write(
        dir.join("firstcap.json"),
        r#"{"parser": "capitalization", "q": "firstcap(Trump)", "qf": "title"}"#,
    )
    .unwrap();

    fs::write(
        dir.join("broken.json"),
        r#"{"parser": "proximity", "q": "no operator here", "qf": "title"}"#,
    )
    .unwrap();

    dir
}
