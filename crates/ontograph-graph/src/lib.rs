//! In-memory ontology graph built from OBO-style flat files.
//!
//! The load is read-then-freeze: [`Ontology::parse`] (or
//! [`Ontology::load`] for a file on disk) runs the whole pipeline in one
//! synchronous call and either returns a fully assembled, internally
//! consistent graph or a single typed error. Nothing mutates the graph
//! after construction, so a finished [`Ontology`] can be shared across
//! threads as a plain value.
//!
//! Pipeline:
//! 1. `ontograph-obo` turns the text into attribute records.
//! 2. [`Term`] and [`Relation`] values are built from the records,
//!    enforcing the single-valued required fields.
//! 3. The assembler resolves `is_a` / `relationship` cross-references
//!    against the fully-parsed collections, populates each relation's
//!    pair set, and synthesizes the configured inverse relations.

pub mod error;
pub mod model;
pub mod ontology;

pub use error::{OntologyError, ReferenceKind};
pub use model::{Relation, Term};
pub use ontology::{Ontology, INVERSE_RELATIONS, IS_A};
