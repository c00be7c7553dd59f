//! Term and relation entities.
//!
//! Both are built from generic attribute records. Construction enforces
//! the single-valued required fields and keeps everything else verbatim
//! under `extra`; cross-references stay as raw strings until the assembler
//! resolves them.

use std::collections::{BTreeMap, BTreeSet};

use ontograph_obo::AttributeRecord;
use serde::{Deserialize, Serialize};

use crate::error::OntologyError;

/// A node in the ontology graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    pub name: String,
    pub definition: String,
    /// Fields not consumed by construction or by graph assembly.
    pub extra: AttributeRecord,
}

impl Term {
    /// Build a term from a `[Term]` record.
    ///
    /// `id`, `name`, and `def` must each carry exactly one value; `def` is
    /// surfaced as `definition`.
    pub fn from_record(mut record: AttributeRecord) -> Result<Self, OntologyError> {
        let id = take_single(&mut record, "id")?;
        let name = take_single(&mut record, "name")?;
        let definition = take_single(&mut record, "def")?;
        Ok(Self {
            id,
            name,
            definition,
            extra: record,
        })
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}

/// A named edge kind connecting terms.
///
/// `pairs` holds the one-hop (source, target) edges declared in the
/// source data. `is_transitive` is recorded metadata only; no closure is
/// ever computed from it. Equality is structural across every field,
/// including the full pair set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
    pub name: String,
    pub is_transitive: bool,
    /// Fields not consumed by construction.
    pub extra: AttributeRecord,
    pairs: BTreeMap<String, BTreeSet<String>>,
}

impl Relation {
    /// Build a relation from a `[Typedef]` record.
    ///
    /// `is_transitive` is optional. When present it must carry exactly one
    /// value; a case-insensitive `"false"` means false, any other value
    /// means true. Absent means false.
    pub fn from_record(mut record: AttributeRecord) -> Result<Self, OntologyError> {
        let id = take_single(&mut record, "id")?;
        let name = take_single(&mut record, "name")?;
        let is_transitive = if record.contains("is_transitive") {
            !take_single(&mut record, "is_transitive")?.eq_ignore_ascii_case("false")
        } else {
            false
        };
        Ok(Self {
            id,
            name,
            is_transitive,
            extra: record,
            pairs: BTreeMap::new(),
        })
    }

    /// The built-in subsumption relation, seeded before any parsing.
    pub fn builtin_is_a() -> Self {
        Self {
            id: "is_a".to_string(),
            name: "is_a".to_string(),
            is_transitive: true,
            extra: AttributeRecord::new(),
            pairs: BTreeMap::new(),
        }
    }

    /// Record the directed pair (source, target). Idempotent.
    pub(crate) fn add_pair(&mut self, source: &str, target: &str) {
        self.pairs
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string());
    }

    /// Pair membership test.
    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.pairs
            .get(source)
            .map_or(false, |targets| targets.contains(target))
    }

    /// Term ids directly related to `source` via this relation. Empty when
    /// `source` has no outgoing edges here.
    pub fn targets(&self, source: &str) -> impl Iterator<Item = &str> + '_ {
        self.pairs
            .get(source)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// All (source, target) pairs. Finite, restartable, order unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |target| (source.as_str(), target.as_str()))
        })
    }

    /// Total number of directed pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// A value copy of this relation under a new id, with every pair
    /// reversed. The copy shares nothing with the original.
    pub(crate) fn inverted(&self, inverse_id: &str) -> Self {
        let mut inverse = Self {
            id: inverse_id.to_string(),
            name: inverse_id.to_string(),
            is_transitive: self.is_transitive,
            extra: self.extra.clone(),
            pairs: BTreeMap::new(),
        };
        for (source, target) in self.iter() {
            inverse.add_pair(target, source);
        }
        inverse
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.id)
    }
}

/// Remove `field` from the record, requiring exactly one value.
fn take_single(record: &mut AttributeRecord, field: &str) -> Result<String, OntologyError> {
    match record.remove(field) {
        Some(mut values) if values.len() == 1 => Ok(values.pop().unwrap_or_default()),
        Some(values) => Err(OntologyError::MalformedRecord {
            field: field.to_string(),
            count: values.len(),
        }),
        None => Err(OntologyError::MalformedRecord {
            field: field.to_string(),
            count: 0,
        }),
    }
}
