use unicode_segmentation::UnicodeSegmentation;

use super::{AnalysisError, TermAnalyzer};

/// Maximum term length kept by the built-in analyzers.
/// Longer tokens are base64 blobs or similar and never make useful terms.
const MAX_TERM_LENGTH: usize = 255;

/// Unicode word-boundary analyzer with lowercasing.
///
/// Splits on UAX #29 word boundaries, drops tokens that contain no
/// alphanumeric character (whitespace, punctuation, quotes) and lowercases
/// the rest. Roughly what a "standard" query analyzer does, minus stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAnalyzer;

impl TermAnalyzer for StandardAnalyzer {
    fn analyze(&self, _field: &str, text: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(extract_terms(text))
    }
}

/// Splits on whitespace and keeps tokens untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceAnalyzer;

impl TermAnalyzer for WhitespaceAnalyzer {
    fn analyze(&self, _field: &str, text: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(text
            .split_whitespace()
            .filter(|token| token.len() <= MAX_TERM_LENGTH)
            .map(str::to_string)
            .collect())
    }
}

/// Extract lowercased word terms in document order
pub fn extract_terms(content: &str) -> Vec<String> {
    content
        .split_word_bounds()
        .filter(|token| is_word(token) && token.len() <= MAX_TERM_LENGTH)
        .map(|token| {
            if token.chars().any(char::is_uppercase) {
                token.to_lowercase()
            } else {
                token.to_string()
            }
        })
        .collect()
}

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_terms_lowercases() {
        assert_eq!(extract_terms("Quick Brown Fox"), vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_extract_terms_drops_punctuation() {
        assert_eq!(extract_terms("\"cat, kitty!\""), vec!["cat", "kitty"]);
    }

    #[test]
    fn test_extract_terms_keeps_order_and_duplicates() {
        assert_eq!(extract_terms("dog cat dog"), vec!["dog", "cat", "dog"]);
    }

    #[test]
    fn test_extract_terms_unicode() {
        assert_eq!(extract_terms("Ärger über Öl"), vec!["ärger", "über", "öl"]);
    }

    #[test]
    fn test_extract_terms_empty() {
        assert!(extract_terms("  ... ").is_empty());
    }

    #[test]
    fn test_whitespace_analyzer_keeps_case() {
        let terms = WhitespaceAnalyzer.analyze("title", " Fox  DOG ").unwrap();
        assert_eq!(terms, vec!["Fox", "DOG"]);
    }

    #[test]
    fn test_overlong_tokens_dropped() {
        let long = "x".repeat(MAX_TERM_LENGTH + 1);
        let text = format!("short {}", long);
        assert_eq!(extract_terms(&text), vec!["short"]);
        assert_eq!(WhitespaceAnalyzer.analyze("f", &text).unwrap(), vec!["short"]);
    }
}
