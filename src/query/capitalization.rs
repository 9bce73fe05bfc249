use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use super::ast::{QueryNode, Term};
use crate::analysis::{CapitalizationClass, TermAnalyzer, analyze_terms};
use crate::error::{Error, Result};

const USAGE: &str = "usage: [firstcap|allcap|cap](term), e.g. firstcap(trump)";

static CAPITALIZATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(firstcap|allcap|cap)\(\s*(\S+)\s*\)$").expect("valid capitalization regex")
});

/// Parsed `keyword(term)` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapitalizationExpression {
    pub class: CapitalizationClass,
    pub term: String,
}

impl CapitalizationExpression {
    /// Parse `firstcap(Trump)` and friends, analyzing the argument down to
    /// exactly one term
    pub fn parse(field: &str, raw: &str, analyzer: &dyn TermAnalyzer) -> Result<Self> {
        let trimmed = raw.trim();
        let caps = CAPITALIZATION
            .captures(trimmed)
            .ok_or_else(|| Error::syntax_at(format!("invalid syntax; {}", USAGE), trimmed))?;

        let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let class = CapitalizationClass::from_keyword(keyword).ok_or_else(|| {
            Error::syntax_at("no payload is associated with the operator", keyword)
        })?;
        let argument = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        debug!("op: {:?}, term: {:?}", class.keyword(), argument);

        let mut terms = analyze_terms(analyzer, field, argument)?;
        if terms.len() > 1 {
            return Err(Error::syntax_at("expected a single term", argument));
        }
        let term = terms
            .pop()
            .ok_or_else(|| Error::syntax_at("empty operand", argument))?;

        Ok(Self { class, term })
    }

    pub fn into_query(self, field: &str) -> QueryNode {
        QueryNode::PayloadCheckedTerm {
            term: Term::new(field, self.term),
            payload: vec![self.class.code()],
        }
    }
}

/// Compile a capitalization expression into a payload-checked term
pub fn compile(field: &str, raw: &str, analyzer: &dyn TermAnalyzer) -> Result<QueryNode> {
    let node = CapitalizationExpression::parse(field, raw, analyzer)?.into_query(field);
    log::trace!("compiled {:?} -> {}", raw, node);
    Ok(node)
}
