//! Request parameters.
//!
//! A host passes the expression together with a small parameter set: the
//! query field (`qf`), minimum-should-match as a percentage (`mm`) and the
//! composition mode. The same shape is accepted as a JSON document:
//!
//! ```json
//! { "parser": "proximity", "q": "quick fox w5 dog", "qf": "title", "mm": "50%" }
//! { "parser": "capitalization", "q": "firstcap(trump)", "qf": "title" }
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::{self, TermAnalyzer};
use crate::error::{Error, Result};
use crate::query::{self, CompileMode, QueryNode};

/// Minimum-should-match used when the request does not set `mm`
pub const DEFAULT_MM_PERCENT: u32 = 100;

/// Analyzer used when the request does not name one
pub const DEFAULT_ANALYZER: &str = "standard";

/// Parameters for a proximity expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityParams {
    /// Query field
    pub qf: String,
    /// Minimum should match, as a percentage (`"75"` or `"75%"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mm: Option<String>,
    #[serde(default)]
    pub mode: CompileMode,
}

impl ProximityParams {
    pub fn new(qf: impl Into<String>) -> Self {
        Self {
            qf: qf.into(),
            mm: None,
            mode: CompileMode::default(),
        }
    }

    pub fn mm_percent(&self) -> Result<u32> {
        parse_mm(self.mm.as_deref())
    }

    pub fn compile(&self, raw: &str, analyzer: &dyn TermAnalyzer) -> Result<QueryNode> {
        validate_field(&self.qf)?;
        query::compile_proximity(&self.qf, raw, analyzer, self.mode, self.mm_percent()?)
    }
}

/// Parameters for a capitalization expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalizationParams {
    /// Query field
    pub qf: String,
}

impl CapitalizationParams {
    pub fn compile(&self, raw: &str, analyzer: &dyn TermAnalyzer) -> Result<QueryNode> {
        validate_field(&self.qf)?;
        query::compile_capitalization(&self.qf, raw, analyzer)
    }
}

/// A complete compile request, as read from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "parser", rename_all = "snake_case")]
pub enum QueryRequest {
    Proximity {
        q: String,
        qf: String,
        #[serde(default)]
        mm: Option<String>,
        #[serde(default)]
        mode: CompileMode,
        #[serde(default)]
        analyzer: Option<String>,
    },
    Capitalization {
        q: String,
        qf: String,
        #[serde(default)]
        analyzer: Option<String>,
    },
}

impl QueryRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn analyzer_name(&self) -> &str {
        match self {
            QueryRequest::Proximity { analyzer, .. }
            | QueryRequest::Capitalization { analyzer, .. } => {
                analyzer.as_deref().unwrap_or(DEFAULT_ANALYZER)
            }
        }
    }

    /// Compile with the built-in analyzer the request names
    pub fn compile(&self) -> Result<QueryNode> {
        let name = self.analyzer_name();
        let analyzer = analysis::for_name(name)
            .ok_or_else(|| Error::Config(format!("unknown analyzer \"{}\"", name)))?;
        self.compile_with(analyzer.as_ref())
    }

    pub fn compile_with(&self, analyzer: &dyn TermAnalyzer) -> Result<QueryNode> {
        match self {
            QueryRequest::Proximity {
                q, qf, mm, mode, ..
            } => ProximityParams {
                qf: qf.clone(),
                mm: mm.clone(),
                mode: *mode,
            }
            .compile(q, analyzer),
            QueryRequest::Capitalization { q, qf, .. } => {
                CapitalizationParams { qf: qf.clone() }.compile(q, analyzer)
            }
        }
    }
}

/// Parse the `mm` parameter: absent means 100, a trailing `%` is allowed
pub fn parse_mm(mm: Option<&str>) -> Result<u32> {
    let Some(raw) = mm else {
        return Ok(DEFAULT_MM_PERCENT);
    };
    let value = raw.trim();
    let digits = value.strip_suffix('%').unwrap_or(value).trim();

    let percent: u32 = digits
        .parse()
        .map_err(|_| Error::syntax_at("invalid mm format", raw))?;
    if percent > 100 {
        return Err(Error::syntax_at("mm must be between 0 and 100", raw));
    }
    Ok(percent)
}

fn validate_field(qf: &str) -> Result<()> {
    if qf.trim().is_empty() {
        return Err(Error::Config("missing query field (qf)".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StandardAnalyzer;

    #[test]
    fn test_parse_mm_default() {
        assert_eq!(parse_mm(None).unwrap(), 100);
    }

    #[test]
    fn test_parse_mm_values() {
        assert_eq!(parse_mm(Some("50")).unwrap(), 50);
        assert_eq!(parse_mm(Some(" 75% ")).unwrap(), 75);
        assert_eq!(parse_mm(Some("0")).unwrap(), 0);
    }

    #[test]
    fn test_parse_mm_invalid() {
        let err = parse_mm(Some("most")).unwrap_err();
        assert!(err.to_string().starts_with("invalid mm format"));
        assert!(parse_mm(Some("-5")).is_err());
        assert!(parse_mm(Some("101")).is_err());
    }

    #[test]
    fn test_request_from_json_defaults() {
        let req = QueryRequest::from_json(
            r#"{"parser": "proximity", "q": "fox w4 dog", "qf": "title"}"#,
        )
        .unwrap();
        match &req {
            QueryRequest::Proximity { mm, mode, .. } => {
                assert!(mm.is_none());
                assert_eq!(*mode, CompileMode::LooseTerms);
            }
            other => panic!("unexpected request {other:?}"),
        }
        assert_eq!(req.analyzer_name(), "standard");
    }

    #[test]
    fn test_request_compiles() {
        let req = QueryRequest::from_json(
            r#"{"parser": "proximity", "q": "a b w2 c", "qf": "t", "mm": "50%", "mode": "loose"}"#,
        )
        .unwrap();
        let node = req.compile().unwrap();
        assert!(matches!(node, QueryNode::BooleanOr { minimum_should_match: 1, .. }));
    }

    #[test]
    fn test_capitalization_request() {
        let req = QueryRequest::from_json(
            r#"{"parser": "capitalization", "q": "allcap(NASA)", "qf": "t"}"#,
        )
        .unwrap();
        let node = req.compile().unwrap();
        assert!(matches!(
            node,
            QueryNode::PayloadCheckedTerm { ref payload, .. } if payload == b"A"
        ));
    }

    #[test]
    fn test_request_unknown_analyzer() {
        let req = QueryRequest::from_json(
            r#"{"parser": "capitalization", "q": "cap(x)", "qf": "t", "analyzer": "snowball"}"#,
        )
        .unwrap();
        assert!(matches!(req.compile(), Err(Error::Config(_))));
    }

    #[test]
    fn test_request_malformed_json() {
        assert!(matches!(QueryRequest::from_json("{"), Err(Error::Config(_))));
        assert!(QueryRequest::from_json(r#"{"parser": "fuzzy", "q": "x"}"#).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        let params = ProximityParams::new(" ");
        let err = params.compile("fox w1 dog", &StandardAnalyzer).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_params_round_trip_json() {
        let mut params = ProximityParams::new("title");
        params.mode = CompileMode::PhraseAware;
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("phrase_aware"));
        let back: ProximityParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
