//! Proximity expression grammar.
//!
//! `left <op> right`, where `<op>` is `w<digits>` (ordered) or `n<digits>`
//! (unordered) and each side is bare text or a double-quoted phrase.

use log::debug;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::analysis::{TermAnalyzer, analyze_terms};
use crate::error::{Error, Result};

const USAGE: &str = "usage: one or more terms [w|n]<number> one or more terms, e.g. hello w10 world";

/// Greedy left capture: the operator is the right-most `[wn][0-9]+` that
/// still leaves something on its right. Earlier look-alikes stay in the left
/// text. Distances are ASCII digits only.
static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(.+)([wn][0-9]+)(.+)$").expect("valid expression regex")
});

static OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([wn])([0-9]+)$").expect("valid operator regex"));

/// Raw pieces of an expression, before analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub left: &'a str,
    pub operator: &'a str,
    pub right: &'a str,
}

/// Split a raw expression into left text, operator token and right text
pub fn split(raw: &str) -> Result<Split<'_>> {
    let trimmed = raw.trim();
    let caps = EXPRESSION.captures(trimmed).ok_or_else(|| {
        Error::syntax_at(format!("missing proximity operator; {}", USAGE), trimmed)
    })?;

    // All three groups are mandatory in the pattern
    let group = |i: usize| caps.get(i).map(|m| m.as_str().trim()).unwrap_or_default();
    let split = Split {
        left: group(1),
        operator: group(2),
        right: group(3),
    };

    debug!(
        "left: {:?}; op: {:?}; right: {:?}",
        split.left, split.operator, split.right
    );
    Ok(split)
}

/// Whether matched terms must keep left-before-right order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanOrder {
    /// `w`
    Ordered,
    /// `n`
    Unordered,
}

impl SpanOrder {
    pub fn in_order(self) -> bool {
        matches!(self, SpanOrder::Ordered)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SpanOrder::Ordered => "w",
            SpanOrder::Unordered => "n",
        }
    }
}

/// Parsed `w<distance>` / `n<distance>` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProximityOperator {
    pub ordering: SpanOrder,
    /// Maximum number of intervening positions
    pub distance: u32,
}

/// Parse an operator token such as `w5` or `N10`
pub fn parse_operator(token: &str) -> Result<ProximityOperator> {
    let caps = OPERATOR.captures(token).ok_or_else(|| {
        Error::syntax_at(format!("invalid operator syntax; {}", USAGE), token)
    })?;

    let ordering = match caps.get(1).map(|m| m.as_str()) {
        Some("w") | Some("W") => SpanOrder::Ordered,
        _ => SpanOrder::Unordered,
    };

    let digits = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    let distance = digits
        .parse::<u32>()
        .map_err(|_| Error::syntax_at("proximity distance out of range", token))?;

    Ok(ProximityOperator { ordering, distance })
}

/// One side of a proximity expression, after analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "terms", rename_all = "snake_case")]
pub enum Operand {
    /// Quoted text: terms must appear adjacent and in order
    Phrase(Vec<String>),
    /// Bare text: each term stands on its own
    TermSet(Vec<String>),
}

impl Operand {
    pub fn terms(&self) -> &[String] {
        match self {
            Operand::Phrase(terms) | Operand::TermSet(terms) => terms,
        }
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self, Operand::Phrase(_))
    }
}

/// Strip one pair of double quotes wrapping the whole text
fn unquote(text: &str) -> Option<&str> {
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Analyze operand text into a [`Operand`].
///
/// With `phrases` off, quotes are left in the text for the analyzer to deal
/// with and the operand is always a term set.
pub fn classify(
    field: &str,
    text: &str,
    analyzer: &dyn TermAnalyzer,
    phrases: bool,
) -> Result<Operand> {
    let text = text.trim();
    let quoted = if phrases { unquote(text) } else { None };

    let operand = match quoted {
        Some(inner) => Operand::Phrase(analyze_terms(analyzer, field, inner)?),
        None => Operand::TermSet(analyze_terms(analyzer, field, text)?),
    };

    if operand.terms().is_empty() {
        return Err(Error::syntax_at("empty operand", text));
    }
    Ok(operand)
}

/// Fully parsed `left <op> right` expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProximityExpression {
    pub left: Operand,
    pub operator: ProximityOperator,
    pub right: Operand,
}

impl ProximityExpression {
    /// Split, analyze both sides and parse the operator
    pub fn parse(
        field: &str,
        raw: &str,
        analyzer: &dyn TermAnalyzer,
        phrases: bool,
    ) -> Result<Self> {
        let split = split(raw)?;
        let left = classify(field, split.left, analyzer, phrases)?;
        let right = classify(field, split.right, analyzer, phrases)?;
        let operator = parse_operator(split.operator)?;

        Ok(Self {
            left,
            operator,
            right,
        })
    }

    pub fn keyword(&self) -> &'static str {
        self.operator.ordering.keyword()
    }

    pub fn distance(&self) -> u32 {
        self.operator.distance
    }

    pub fn in_order(&self) -> bool {
        self.operator.ordering.in_order()
    }

    pub fn left_terms(&self) -> &[String] {
        self.left.terms()
    }

    pub fn right_terms(&self) -> &[String] {
        self.right.terms()
    }
}
