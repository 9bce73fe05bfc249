//! Terminal rendering of compiled query trees

use crate::analysis::CapitalizationClass;
use crate::query::{QueryNode, SpanQuery};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How to print a compiled query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One-line Lucene-style rendering
    Line,
    /// Indented tree
    Tree,
    /// Pretty-printed JSON
    Json,
}

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print a compiled query to stdout
pub fn print_query(node: &QueryNode, format: Format, color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    write_query(&mut out, node, format)
}

pub fn write_query<W: WriteColor>(out: &mut W, node: &QueryNode, format: Format) -> io::Result<()> {
    match format {
        Format::Line => writeln!(out, "{}", node),
        Format::Tree => write_node(out, node, 0),
        Format::Json => {
            let json = serde_json::to_string_pretty(node).map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        }
    }
}

fn indent<W: Write>(out: &mut W, depth: usize) -> io::Result<()> {
    write!(out, "{:width$}", "", width = depth * 2)
}

fn label<W: WriteColor>(out: &mut W, text: &str, color: Color) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", text)?;
    out.reset()
}

fn write_node<W: WriteColor>(out: &mut W, node: &QueryNode, depth: usize) -> io::Result<()> {
    indent(out, depth)?;
    match node {
        QueryNode::Term(term) => {
            label(out, "term", Color::Green)?;
            writeln!(out, " {}", term)
        }
        QueryNode::Span(span) => write_span(out, span, depth),
        QueryNode::BooleanOr {
            clauses,
            minimum_should_match,
        } => {
            label(out, "or", Color::Magenta)?;
            writeln!(out, " mm={}", minimum_should_match)?;
            for clause in clauses {
                if clause.required {
                    indent(out, depth + 1)?;
                    label(out, "must", Color::Red)?;
                    writeln!(out)?;
                    write_node(out, &clause.query, depth + 2)?;
                } else {
                    write_node(out, &clause.query, depth + 1)?;
                }
            }
            Ok(())
        }
        QueryNode::PayloadCheckedTerm { term, payload } => {
            label(out, "payload", Color::Yellow)?;
            let class = payload
                .first()
                .and_then(|code| CapitalizationClass::from_code(*code))
                .map(|c| c.keyword())
                .unwrap_or("?");
            writeln!(out, " {} = {} ({})", term, String::from_utf8_lossy(payload), class)
        }
    }
}

fn write_span<W: WriteColor>(out: &mut W, span: &SpanQuery, depth: usize) -> io::Result<()> {
    match span {
        SpanQuery::Term(term) => {
            label(out, "span", Color::Cyan)?;
            writeln!(out, " {}", term)
        }
        SpanQuery::Near {
            clauses,
            slop,
            in_order,
        } => {
            label(out, "near", Color::Blue)?;
            let order = if *in_order { "ordered" } else { "unordered" };
            writeln!(out, " slop={} {}", slop, order)?;
            for clause in clauses {
                indent(out, depth + 1)?;
                write_span(out, clause, depth + 1)?;
            }
            Ok(())
        }
        SpanQuery::Or { clauses } => {
            label(out, "span-or", Color::Magenta)?;
            writeln!(out, " ({} clauses)", clauses.len())?;
            for clause in clauses {
                indent(out, depth + 1)?;
                write_span(out, clause, depth + 1)?;
            }
            Ok(())
        }
    }
}

/// Print the capitalization class each raw token would be indexed with
pub fn print_classes(tokens: &[String], color: bool) -> io::Result<()> {
    let mut out = stdout(color);
    write_classes(&mut out, tokens)
}

pub fn write_classes<W: WriteColor>(out: &mut W, tokens: &[String]) -> io::Result<()> {
    for token in tokens {
        write!(out, "{}\t", token)?;
        match CapitalizationClass::of_token(token) {
            Some(class) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "{}", class)?;
                out.reset()?;
                writeln!(out, " ({})", class.code() as char)?;
            }
            None => writeln!(out, "-")?,
        }
    }
    Ok(())
}
