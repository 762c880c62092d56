//! Term normalization for the mixed object representation.
//!
//! Ontology sources hand the explorer two shapes of object value: a bare
//! string, or a structured RDF term with kind, datatype, and language tag.
//! Everything downstream (filtering, projection, selection equality) goes
//! through [`ObjectValue::resolved`] so the two shapes compare and display
//! identically. The helpers here are total: any string input produces a
//! usable label and namespace, never an error.

use serde::{Deserialize, Serialize};

/// Kind discriminant for a structured RDF term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Literal,
    Uri,
}

/// A structured RDF term as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfTerm {
    pub kind: TermKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Object position of a triple: either a bare string or a structured term.
///
/// Serialized untagged so the wire shape matches the source data model:
/// a JSON string for [`ObjectValue::Plain`], an object for
/// [`ObjectValue::Term`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectValue {
    Plain(String),
    Term(RdfTerm),
}

impl ObjectValue {
    pub fn plain(value: impl Into<String>) -> Self {
        ObjectValue::Plain(value.into())
    }

    pub fn uri(value: impl Into<String>) -> Self {
        ObjectValue::Term(RdfTerm {
            kind: TermKind::Uri,
            value: value.into(),
            datatype: None,
            lang: None,
        })
    }

    pub fn literal(value: impl Into<String>) -> Self {
        ObjectValue::Term(RdfTerm {
            kind: TermKind::Literal,
            value: value.into(),
            datatype: None,
            lang: None,
        })
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        ObjectValue::Term(RdfTerm {
            kind: TermKind::Literal,
            value: value.into(),
            datatype: Some(datatype.into()),
            lang: None,
        })
    }

    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        ObjectValue::Term(RdfTerm {
            kind: TermKind::Literal,
            value: value.into(),
            datatype: None,
            lang: Some(lang.into()),
        })
    }

    /// Canonical string form of the object, regardless of representation.
    ///
    /// This is the single access path for comparisons and display; nothing
    /// else in the crate matches on the union to read a value out.
    pub fn resolved(&self) -> &str {
        match self {
            ObjectValue::Plain(value) => value,
            ObjectValue::Term(term) => &term.value,
        }
    }

    /// Whether the resolved value names an entity worth linking to in the
    /// graph projection.
    pub fn is_linkable(&self) -> bool {
        is_linkable_entity(self.resolved())
    }
}

impl From<&str> for ObjectValue {
    fn from(value: &str) -> Self {
        ObjectValue::Plain(value.to_string())
    }
}

impl From<String> for ObjectValue {
    fn from(value: String) -> Self {
        ObjectValue::Plain(value)
    }
}

/// Entity detection by scheme prefix.
///
/// Matches `http://`, `https://`, and `urn:` values. Everything else
/// (literals, blank node labels, relative strings) is data, not a node.
pub fn is_linkable_entity(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with("urn:")
}

/// Compact display label for linkable entities: the final segment after
/// splitting on `/` and `#`. A trailing separator leaves no final segment,
/// in which case the whole string comes back. Non-entity values pass
/// through unchanged.
pub fn short_label(value: &str) -> &str {
    if !is_linkable_entity(value) {
        return value;
    }
    match value.rsplit(['/', '#']).next() {
        Some(last) if !last.is_empty() => last,
        _ => value,
    }
}

/// Namespace prefix of a linkable entity: everything up to and including
/// the final `/` or `#`. Non-linkable input has no namespace.
pub fn namespace_of(value: &str) -> &str {
    if !is_linkable_entity(value) {
        return "";
    }
    match value.rfind(['/', '#']) {
        Some(idx) => &value[..=idx],
        None => "",
    }
}
