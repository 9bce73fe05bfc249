pub mod ast;
pub mod capitalization;
pub mod compiler;
pub mod parser;

pub use ast::{BooleanClause, QueryNode, SpanBuilder, SpanQuery, Term};
pub use capitalization::CapitalizationExpression;
pub use compiler::{CompileMode, minimum_should_match};
pub use parser::{Operand, ProximityExpression, ProximityOperator, SpanOrder};

use crate::analysis::TermAnalyzer;
use crate::error::Result;

/// Parse and compile a proximity expression such as `quick fox w5 dog`
pub fn compile_proximity(
    field: &str,
    raw: &str,
    analyzer: &dyn TermAnalyzer,
    mode: CompileMode,
    minimum_should_match_percent: u32,
) -> Result<QueryNode> {
    let expr = ProximityExpression::parse(field, raw, analyzer, mode.recognizes_phrases())?;
    compiler::compile(field, &expr, mode, minimum_should_match_percent)
}

/// Parse and compile a capitalization expression such as `firstcap(trump)`
pub fn compile_capitalization(
    field: &str,
    raw: &str,
    analyzer: &dyn TermAnalyzer,
) -> Result<QueryNode> {
    capitalization::compile(field, raw, analyzer)
}
