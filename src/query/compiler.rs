//! Span tree construction.
//!
//! Two ways of turning a [`ProximityExpression`] into a query tree:
//!
//! - [`CompileMode::PhraseAware`] honours quoted phrases and expands
//!   multi-term sides into every candidate pairing, OR-ed together.
//! - [`CompileMode::LooseTerms`] links only the two terms next to the
//!   operator and keeps the remaining terms as optional plain clauses,
//!   with a minimum-should-match derived from a percentage.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::ast::{BooleanClause, QueryNode, SpanBuilder, SpanQuery};
use super::parser::{Operand, ProximityExpression};
use crate::error::{Error, Result};

/// Composition strategy for proximity expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompileMode {
    /// Quoted phrases, cross-product expansion of term sets
    #[serde(alias = "phrase")]
    PhraseAware,
    /// One proximity clause plus loose optional terms
    #[default]
    #[serde(alias = "loose")]
    LooseTerms,
}

impl CompileMode {
    /// Whether operands in double quotes are parsed as phrases
    pub fn recognizes_phrases(self) -> bool {
        matches!(self, CompileMode::PhraseAware)
    }
}

impl std::str::FromStr for CompileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "phrase" | "phrase_aware" => Ok(CompileMode::PhraseAware),
            "loose" | "loose_terms" => Ok(CompileMode::LooseTerms),
            _ => Err(Error::syntax_at("unknown compile mode", s)),
        }
    }
}

/// Compile a parsed expression into a query tree.
///
/// `minimum_should_match_percent` only matters in loose-term mode and is
/// clamped to 100.
pub fn compile(
    field: &str,
    expr: &ProximityExpression,
    mode: CompileMode,
    minimum_should_match_percent: u32,
) -> Result<QueryNode> {
    let node = match mode {
        CompileMode::PhraseAware => QueryNode::Span(compile_phrase_aware(field, expr)),
        CompileMode::LooseTerms => compile_loose(field, expr, minimum_should_match_percent)?,
    };
    trace!("compiled {:?} -> {}", mode, node);
    Ok(node)
}

/// A side that yields exactly one span (phrase or single term), or the
/// individual candidate terms of a multi-term set
enum Side {
    Fixed(SpanQuery),
    Candidates(Vec<SpanQuery>),
}

fn side(b: &SpanBuilder<'_>, operand: &Operand) -> Side {
    match operand {
        Operand::Phrase(terms) => Side::Fixed(b.phrase(terms.as_slice())),
        Operand::TermSet(terms) if terms.len() == 1 => Side::Fixed(b.term(terms[0].as_str())),
        Operand::TermSet(terms) => {
            Side::Candidates(terms.iter().map(|t| b.term(t.as_str())).collect())
        }
    }
}

fn compile_phrase_aware(field: &str, expr: &ProximityExpression) -> SpanQuery {
    let b = SpanBuilder::new(field);
    let slop = expr.distance();
    let in_order = expr.in_order();
    let pair = |left: SpanQuery, right: SpanQuery| b.near(vec![left, right], slop, in_order);

    match (side(&b, &expr.left), side(&b, &expr.right)) {
        (Side::Fixed(left), Side::Fixed(right)) => pair(left, right),
        (Side::Candidates(lefts), Side::Fixed(right)) => b.or(lefts
            .into_iter()
            .map(|left| pair(left, right.clone()))
            .collect()),
        (Side::Fixed(left), Side::Candidates(rights)) => b.or(rights
            .into_iter()
            .map(|right| pair(left.clone(), right))
            .collect()),
        (Side::Candidates(lefts), Side::Candidates(rights)) => {
            let mut spans = Vec::with_capacity(lefts.len() * rights.len());
            for left in &lefts {
                for right in &rights {
                    spans.push(pair(left.clone(), right.clone()));
                }
            }
            b.or(spans)
        }
    }
}

fn compile_loose(field: &str, expr: &ProximityExpression, percent: u32) -> Result<QueryNode> {
    let b = SpanBuilder::new(field);
    let left = expr.left_terms();
    let right = expr.right_terms();

    let (Some((last_left, leading)), Some((first_right, trailing))) =
        (left.split_last(), right.split_first())
    else {
        return Err(Error::syntax("empty operand"));
    };

    let proximity = b.near(
        vec![b.term(last_left.as_str()), b.term(first_right.as_str())],
        expr.distance(),
        expr.in_order(),
    );

    let mut clauses = Vec::with_capacity(leading.len() + 1 + trailing.len());
    clauses.extend(leading.iter().map(|t| BooleanClause::should(b.plain_term(t.as_str()))));
    clauses.push(BooleanClause::should(QueryNode::Span(proximity)));
    clauses.extend(trailing.iter().map(|t| BooleanClause::should(b.plain_term(t.as_str()))));

    let minimum_should_match = minimum_should_match(clauses.len(), percent);
    debug!(
        "clauses: {}, mm: {}% -> {}",
        clauses.len(),
        percent,
        minimum_should_match
    );

    Ok(QueryNode::BooleanOr {
        clauses,
        minimum_should_match,
    })
}

/// `round(count * percent / 100)` with halves rounded up, never zero when
/// both inputs are positive
pub fn minimum_should_match(clause_count: usize, percent: u32) -> u32 {
    let percent = percent.min(100) as u64;
    let count = clause_count as u64;
    // Integer form of floor(count * percent / 100 + 0.5)
    let rounded = (count * percent * 2 + 100) / 200;
    let rounded = if rounded == 0 && count > 0 && percent > 0 {
        1
    } else {
        rounded
    };
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
