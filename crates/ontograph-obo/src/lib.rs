//! Flat-file OBO-style record parsing for ontograph.
//!
//! This crate sits at the *format boundary*: it understands the stanza
//! layout of OBO-style ontology files (blank-line-separated blocks with a
//! `[Section]` header and `key: value` lines) and nothing else. Fields are
//! not interpreted here; every stanza comes out as a generic
//! [`AttributeRecord`] tagged with the [`RecordKind`] its section header
//! declared.
//!
//! Interpretation of the records (required fields, cross-references, graph
//! assembly) lives in `ontograph-graph`.

pub mod parser;
pub mod record;

pub use parser::{parse_records, RecordError};
pub use record::{AttributeRecord, RecordKind};
