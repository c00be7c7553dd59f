//! Error taxonomy for the whole load.
//!
//! Every variant is fatal: there is no partial-ontology recovery, and a
//! failed load exposes no state.

use thiserror::Error;

/// Which id namespace an unresolved cross-reference was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Term,
    Relation,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Term => write!(f, "term"),
            ReferenceKind::Relation => write!(f, "relation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OntologyError {
    /// The flat-file layer rejected a line.
    #[error(transparent)]
    Parse(#[from] ontograph_obo::RecordError),

    /// A required single-valued field was missing or multi-valued.
    #[error("field `{field}` must have exactly one value, found {count}")]
    MalformedRecord { field: String, count: usize },

    /// An `is_a` or `relationship` value named an unknown id.
    #[error("unresolved {kind} reference `{id}`")]
    UnresolvedReference { kind: ReferenceKind, id: String },

    /// A `relationship` value with fewer than two tokens.
    #[error("malformed relationship value `{value}` on term `{term}`")]
    MalformedCrossReference { term: String, value: String },

    /// Inverse synthesis named a source relation that was never declared.
    #[error("inverse synthesis source relation `{id}` is not defined")]
    MissingInverseSource { id: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
