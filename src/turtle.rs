//! Turtle ingestion.
//!
//! Wraps the oxttl parser and flattens its term model into the explorer's
//! triple records. The whole document is buffered before anything is
//! returned: a syntax error anywhere aborts the load, so callers can swap
//! the store atomically and keep the previous ontology on failure.
//!
//! Object mapping follows the source data model: named and blank nodes
//! become plain strings (IRI or bare label), literals become structured
//! terms with their datatype IRI always set and the language tag when one
//! is present.

use std::path::Path;

use oxrdf::{Subject, Term};
use oxttl::TurtleParser;
use tracing::debug;

use crate::error::LoadError;
use crate::term::{ObjectValue, RdfTerm, TermKind};
use crate::triple::Triple;

/// Parse a Turtle document into triples.
pub fn parse_turtle(text: &str) -> Result<Vec<Triple>, LoadError> {
    let mut triples = Vec::new();

    for item in TurtleParser::new().for_slice(text.as_bytes()) {
        let parsed = item.map_err(|err| LoadError::TurtleSyntax {
            message: err.to_string(),
        })?;

        let subject = match &parsed.subject {
            Subject::NamedNode(node) => node.as_str().to_string(),
            Subject::BlankNode(node) => node.as_str().to_string(),
        };

        let object = match &parsed.object {
            Term::NamedNode(node) => ObjectValue::plain(node.as_str()),
            Term::BlankNode(node) => ObjectValue::plain(node.as_str()),
            Term::Literal(literal) => ObjectValue::Term(RdfTerm {
                kind: TermKind::Literal,
                value: literal.value().to_string(),
                datatype: Some(literal.datatype().as_str().to_string()),
                lang: literal.language().map(str::to_string),
            }),
        };

        triples.push(Triple {
            subject,
            predicate: parsed.predicate.as_str().to_string(),
            object,
        });
    }

    debug!(triples = triples.len(), "parsed Turtle document");
    Ok(triples)
}

/// Read and parse a Turtle file.
pub fn load_file(path: &Path) -> Result<Vec<Triple>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_turtle(&text)
}
