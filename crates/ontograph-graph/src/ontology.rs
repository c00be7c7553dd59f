//! The assembled ontology and the load pipeline.
//!
//! Loading is two-pass: every record is parsed into its entity first, then
//! cross-references are resolved against the complete collections. The
//! assembler collects edges in a read-only sweep, validates them, applies
//! them, and only then strips the consumed `is_a` / `relationship` fields
//! from each term's extras. Inverse relations are synthesized last.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use ontograph_obo::{parse_records, RecordKind};
use serde::{Deserialize, Serialize};

use crate::error::{OntologyError, ReferenceKind};
use crate::model::{Relation, Term};

/// Id of the built-in subsumption relation, present in every ontology.
pub const IS_A: &str = "is_a";

/// (source, inverse) relation ids synthesized after assembly.
///
/// Synthesis is unconditional for `Ontology::parse` / `Ontology::load`:
/// a file that never declares `part_of` fails the full load with
/// [`OntologyError::MissingInverseSource`]. Use
/// [`Ontology::parse_with_inverses`] to load with a different table (or
/// none at all).
pub const INVERSE_RELATIONS: &[(&str, &str)] = &[("part_of", "has_part")];

/// An immutable term/relation graph.
///
/// Built once by [`Ontology::parse`] or [`Ontology::load`]; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    terms: HashMap<String, Term>,
    relations: BTreeMap<String, Relation>,
}

impl Ontology {
    /// Read `path` and run the full load, including synthesis of the
    /// built-in inverse table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let ontology = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            terms = ontology.term_count(),
            relations = ontology.relation_count(),
            "loaded ontology"
        );
        Ok(ontology)
    }

    /// Run the full load on in-memory text, including synthesis of the
    /// built-in inverse table.
    pub fn parse(text: &str) -> Result<Self, OntologyError> {
        Self::parse_with_inverses(text, INVERSE_RELATIONS)
    }

    /// Run the full load with an explicit inverse table.
    ///
    /// Duplicate term or relation ids across records resolve to the last
    /// record seen, matching plain map insertion.
    pub fn parse_with_inverses(
        text: &str,
        inverses: &[(&str, &str)],
    ) -> Result<Self, OntologyError> {
        let mut terms: HashMap<String, Term> = HashMap::new();
        let mut relations: BTreeMap<String, Relation> = BTreeMap::new();
        relations.insert(IS_A.to_string(), Relation::builtin_is_a());

        for (kind, record) in parse_records(text)? {
            match kind {
                RecordKind::Term => {
                    let term = Term::from_record(record)?;
                    terms.insert(term.id.clone(), term);
                }
                RecordKind::Typedef => {
                    let relation = Relation::from_record(record)?;
                    relations.insert(relation.id.clone(), relation);
                }
            }
        }

        resolve_references(&mut terms, &mut relations)?;
        synthesize_inverses(&mut relations, inverses)?;

        Ok(Self { terms, relations })
    }

    /// Term lookup by id. O(1).
    pub fn term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    /// Relation lookup by id. Always resolves `is_a`.
    pub fn relation(&self, id: &str) -> Option<&Relation> {
        self.relations.get(id)
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

/// A cross-reference edge collected before any relation is touched.
struct Edge {
    relation: String,
    source: String,
    target: String,
}

/// Resolve `is_a` and `relationship` cross-references.
///
/// Pass 1 reads `is_a` values of the form `"<term-id> ! <free text>"` and
/// adds edges to the built-in `is_a` relation. Pass 2 reads `relationship`
/// values of the form `"<relation-id> <term-id> ! <free text>"`; only the
/// first two whitespace-delimited tokens are significant. Any unresolved
/// id aborts the load before a single pair is applied.
fn resolve_references(
    terms: &mut HashMap<String, Term>,
    relations: &mut BTreeMap<String, Relation>,
) -> Result<(), OntologyError> {
    let mut edges: Vec<Edge> = Vec::new();

    for term in terms.values() {
        for value in term.extra.get("is_a").into_iter().flatten() {
            // The id is everything before the ` ! ` comment separator; a
            // value without one is taken as a bare id.
            let target = value
                .split_once(" ! ")
                .map_or(value.as_str(), |(id, _)| id)
                .trim();
            if !terms.contains_key(target) {
                return Err(OntologyError::UnresolvedReference {
                    kind: ReferenceKind::Term,
                    id: target.to_string(),
                });
            }
            edges.push(Edge {
                relation: IS_A.to_string(),
                source: term.id.clone(),
                target: target.to_string(),
            });
        }
    }

    for term in terms.values() {
        for value in term.extra.get("relationship").into_iter().flatten() {
            let mut tokens = value.split_whitespace();
            let (Some(relation), Some(target)) = (tokens.next(), tokens.next()) else {
                return Err(OntologyError::MalformedCrossReference {
                    term: term.id.clone(),
                    value: value.clone(),
                });
            };
            if !relations.contains_key(relation) {
                return Err(OntologyError::UnresolvedReference {
                    kind: ReferenceKind::Relation,
                    id: relation.to_string(),
                });
            }
            if !terms.contains_key(target) {
                return Err(OntologyError::UnresolvedReference {
                    kind: ReferenceKind::Term,
                    id: target.to_string(),
                });
            }
            edges.push(Edge {
                relation: relation.to_string(),
                source: term.id.clone(),
                target: target.to_string(),
            });
        }
    }

    for edge in &edges {
        if let Some(relation) = relations.get_mut(&edge.relation) {
            relation.add_pair(&edge.source, &edge.target);
        }
    }

    // The cross-reference fields are now represented structurally.
    for term in terms.values_mut() {
        term.extra.remove("is_a");
        term.extra.remove("relationship");
    }

    Ok(())
}

/// Materialize the inverse of each configured source relation.
///
/// An existing relation under the inverse id is replaced (last write
/// wins); the replacement is logged at warn level.
fn synthesize_inverses(
    relations: &mut BTreeMap<String, Relation>,
    inverses: &[(&str, &str)],
) -> Result<(), OntologyError> {
    for &(source_id, inverse_id) in inverses {
        let source = relations
            .get(source_id)
            .ok_or_else(|| OntologyError::MissingInverseSource {
                id: source_id.to_string(),
            })?;
        let inverse = source.inverted(inverse_id);
        if relations.insert(inverse_id.to_string(), inverse).is_some() {
            tracing::warn!(
                relation = %inverse_id,
                "replaced declared relation with synthesized inverse"
            );
        }
    }
    Ok(())
}
