//! The triple record every pipeline stage consumes.

use serde::{Deserialize, Serialize};

use crate::term::ObjectValue;

/// One parsed statement: subject and predicate strings plus an object in
/// either representation.
///
/// The derived `PartialEq` is representational (a plain string object and a
/// structured URI term with the same value are different). Selection and
/// tests that care about meaning compare with [`Triple::same_fact`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: ObjectValue,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<ObjectValue>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Value-equality key: subject, predicate, and the resolved object.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.subject, &self.predicate, self.object.resolved())
    }

    /// Whether two triples state the same fact, ignoring how the object
    /// happens to be represented.
    pub fn same_fact(&self, other: &Triple) -> bool {
        self.key() == other.key()
    }
}
