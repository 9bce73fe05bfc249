use serde::{Deserialize, Serialize};
use std::fmt;

/// A term in a specific field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub field: String,
    pub value: String,
}

impl Term {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Position-bearing query clause.
///
/// Only span clauses can nest inside [`SpanQuery::Near`] and
/// [`SpanQuery::Or`], so a boolean node can never end up inside a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "span", rename_all = "snake_case")]
pub enum SpanQuery {
    /// Single term occurrence
    Term(Term),
    /// Clauses within `slop` positions of each other
    Near {
        clauses: Vec<SpanQuery>,
        slop: u32,
        in_order: bool,
    },
    /// Any of the clauses
    Or { clauses: Vec<SpanQuery> },
}

impl SpanQuery {
    /// Field shared by every term under this span
    pub fn field(&self) -> Option<&str> {
        match self {
            SpanQuery::Term(term) => Some(&term.field),
            SpanQuery::Near { clauses, .. } | SpanQuery::Or { clauses } => {
                clauses.first().and_then(SpanQuery::field)
            }
        }
    }

    /// Collect every term under this span, left to right
    pub fn terms(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a Term>) {
        match self {
            SpanQuery::Term(term) => out.push(term),
            SpanQuery::Near { clauses, .. } | SpanQuery::Or { clauses } => {
                for clause in clauses {
                    clause.collect_terms(out);
                }
            }
        }
    }
}

/// Boolean clause with its occurrence flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanClause {
    pub query: QueryNode,
    /// `true` for must, `false` for should
    pub required: bool,
}

impl BooleanClause {
    pub fn should(query: QueryNode) -> Self {
        Self {
            query,
            required: false,
        }
    }
}

/// Compiled query tree handed to the index executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryNode {
    /// Plain term match, no positions involved
    Term(Term),
    /// Positional clause
    Span(SpanQuery),
    /// Disjunction with a minimum number of matching optional clauses
    BooleanOr {
        clauses: Vec<BooleanClause>,
        minimum_should_match: u32,
    },
    /// Span term whose payload must equal `payload`
    PayloadCheckedTerm { term: Term, payload: Vec<u8> },
}

/// Builds span clauses for a single field
#[derive(Debug, Clone, Copy)]
pub struct SpanBuilder<'a> {
    field: &'a str,
}

impl<'a> SpanBuilder<'a> {
    pub fn new(field: &'a str) -> Self {
        Self { field }
    }

    pub fn term(&self, value: impl Into<String>) -> SpanQuery {
        SpanQuery::Term(Term::new(self.field, value))
    }

    pub fn near(&self, clauses: Vec<SpanQuery>, slop: u32, in_order: bool) -> SpanQuery {
        SpanQuery::Near {
            clauses,
            slop,
            in_order,
        }
    }

    /// Exact phrase: every term in order with no gaps
    pub fn phrase<S: AsRef<str>>(&self, terms: &[S]) -> SpanQuery {
        let clauses = terms.iter().map(|t| self.term(t.as_ref())).collect();
        self.near(clauses, 0, true)
    }

    pub fn or(&self, clauses: Vec<SpanQuery>) -> SpanQuery {
        SpanQuery::Or { clauses }
    }

    pub fn plain_term(&self, value: impl Into<String>) -> QueryNode {
        QueryNode::Term(Term::new(self.field, value))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

impl fmt::Display for SpanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanQuery::Term(term) => write!(f, "{}", term),
            SpanQuery::Near {
                clauses,
                slop,
                in_order,
            } => {
                write!(f, "spanNear([")?;
                write_joined(f, clauses)?;
                write!(f, "], {}, {})", slop, in_order)
            }
            SpanQuery::Or { clauses } => {
                write!(f, "spanOr([")?;
                write_joined(f, clauses)?;
                write!(f, "])")
            }
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Term(term) => write!(f, "{}", term),
            QueryNode::Span(span) => write!(f, "{}", span),
            QueryNode::BooleanOr {
                clauses,
                minimum_should_match,
            } => {
                let wrap = *minimum_should_match > 0;
                if wrap {
                    write!(f, "(")?;
                }
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    if clause.required {
                        write!(f, "+")?;
                    }
                    write!(f, "{}", clause.query)?;
                }
                if wrap {
                    write!(f, ")~{}", minimum_should_match)?;
                }
                Ok(())
            }
            QueryNode::PayloadCheckedTerm { term, payload } => {
                write!(
                    f,
                    "spanPayCheck({}, payloadRef: {})",
                    term,
                    String::from_utf8_lossy(payload)
                )
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, clauses: &[SpanQuery]) -> fmt::Result {
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", clause)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_builder() {
        let b = SpanBuilder::new("title");
        let span = b.phrase(&["quick", "fox"]);
        assert!(matches!(
            span,
            SpanQuery::Near { ref clauses, slop: 0, in_order: true } if clauses.len() == 2
        ));
        assert_eq!(span.field(), Some("title"));
    }

    #[test]
    fn test_terms_left_to_right() {
        let b = SpanBuilder::new("f");
        let span = b.or(vec![
            b.near(vec![b.term("a"), b.term("c")], 2, true),
            b.near(vec![b.term("b"), b.term("c")], 2, true),
        ]);
        let values: Vec<_> = span.terms().iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["a", "c", "b", "c"]);
    }

    #[test]
    fn test_display_span_near() {
        let b = SpanBuilder::new("title");
        let span = b.near(vec![b.term("fox"), b.term("dog")], 4, true);
        assert_eq!(span.to_string(), "spanNear([title:fox, title:dog], 4, true)");
    }

    #[test]
    fn test_display_boolean() {
        let b = SpanBuilder::new("t");
        let node = QueryNode::BooleanOr {
            clauses: vec![
                BooleanClause::should(b.plain_term("brown")),
                BooleanClause::should(QueryNode::Span(b.near(
                    vec![b.term("fox"), b.term("dog")],
                    4,
                    false,
                ))),
                BooleanClause {
                    query: b.plain_term("lazy"),
                    required: true,
                },
            ],
            minimum_should_match: 2,
        };
        assert_eq!(
            node.to_string(),
            "(t:brown spanNear([t:fox, t:dog], 4, false) +t:lazy)~2"
        );
    }

    #[test]
    fn test_display_payload_check() {
        let node = QueryNode::PayloadCheckedTerm {
            term: Term::new("t", "trump"),
            payload: vec![b'F'],
        };
        assert_eq!(node.to_string(), "spanPayCheck(t:trump, payloadRef: F)");
    }

    #[test]
    fn test_serialize_tagged() {
        let node = QueryNode::Term(Term::new("t", "fox"));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "term");
        assert_eq!(json["value"], "fox");
    }

    #[test]
    fn test_serialize_span_round_trip() {
        let b = SpanBuilder::new("t");
        let node = QueryNode::Span(b.near(
            vec![b.term("fox"), b.phrase(&["lazy", "dog"])],
            3,
            false,
        ));
        let json = serde_json::to_string(&node).unwrap();
        let back: QueryNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
