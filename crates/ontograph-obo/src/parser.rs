//! Line-oriented stanza parser for OBO-style flat files.
//!
//! Format rules:
//! - Blocks are separated by blank lines; lines are trimmed before
//!   interpretation, and a whitespace-only line counts as blank.
//! - A `[Word]` line declares the section kind of the block that follows
//!   it. The kind persists until the next blank line resets it.
//! - Every other non-blank line must split into `field: value` on the
//!   first occurrence of the two-character separator `": "`.
//! - Repeated field names within one block accumulate values in encounter
//!   order.
//! - On a blank line, a `[Term]` block is emitted as a Term record and a
//!   `[Typedef]` block as a Typedef record; blocks under any other section
//!   kind (including none) are dropped. The accumulator and section kind
//!   are reset either way.
//! - A trailing block not terminated by a final blank line is dropped, not
//!   flushed. The drop is logged at warn level.

use thiserror::Error;

use crate::record::{AttributeRecord, RecordKind};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed line {line}: missing `: ` separator in {text:?}")]
    MalformedLine { line: usize, text: String },
}

/// Parse the full text of an ontology file into its attribute records, in
/// file order.
pub fn parse_records(text: &str) -> Result<Vec<(RecordKind, AttributeRecord)>, RecordError> {
    let mut records = Vec::new();
    let mut section: Option<&str> = None;
    let mut current = AttributeRecord::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() {
            let record = std::mem::take(&mut current);
            match section {
                Some("Term") => records.push((RecordKind::Term, record)),
                Some("Typedef") => records.push((RecordKind::Typedef, record)),
                _ => {}
            }
            section = None;
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = Some(&line[1..line.len() - 1]);
            continue;
        }

        match line.split_once(": ") {
            Some((field, value)) => current.push(field, value),
            None => {
                return Err(RecordError::MalformedLine {
                    line: index + 1,
                    text: line.to_string(),
                })
            }
        }
    }

    if !current.is_empty() {
        tracing::warn!(
            fields = current.len(),
            "dropping unterminated trailing stanza"
        );
    }
    tracing::trace!(records = records.len(), "parsed attribute records");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_term_and_typedef_stanzas_in_file_order() {
        let text = "\
[Term]
id: GO:0000001
name: example term
def: \"a definition\" [PMID:123]

[Typedef]
id: part_of
name: part_of
is_transitive: true

";
        let records = parse_records(text).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, RecordKind::Term);
        assert_eq!(records[0].1.get("id"), Some(["GO:0000001".to_string()].as_slice()));
        assert_eq!(records[1].0, RecordKind::Typedef);
        assert_eq!(records[1].1.get("name"), Some(["part_of".to_string()].as_slice()));
    }

    #[test]
    fn repeated_fields_accumulate_in_encounter_order() {
        let text = "\
[Term]
id: GO:0000001
name: t
def: d
is_a: GO:0000002 ! a
is_a: GO:0000003 ! b

";
        let records = parse_records(text).expect("parse");
        assert_eq!(
            records[0].1.get("is_a"),
            Some(["GO:0000002 ! a".to_string(), "GO:0000003 ! b".to_string()].as_slice())
        );
    }

    #[test]
    fn value_splits_on_first_separator_only() {
        let text = "[Term]\nid: GO:1\ndef: note: nested colon\nname: n\n\n";
        let records = parse_records(text).expect("parse");
        assert_eq!(
            records[0].1.get("def"),
            Some(["note: nested colon".to_string()].as_slice())
        );
    }

    #[test]
    fn other_sections_are_dropped() {
        let text = "[Header]\nformat-version: 1.2\n\n[Term]\nid: GO:1\nname: n\ndef: d\n\n";
        let records = parse_records(text).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, RecordKind::Term);
    }

    #[test]
    fn headerless_block_is_dropped() {
        let text = "id: GO:1\nname: n\n\n";
        let records = parse_records(text).expect("parse");
        assert!(records.is_empty());
    }

    #[test]
    fn line_without_separator_is_malformed() {
        let text = "[Term]\nid: GO:1\nbroken-line\n\n";
        let err = parse_records(text).expect_err("must fail");
        match err {
            RecordError::MalformedLine { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "broken-line");
            }
        }
    }

    #[test]
    fn trailing_whitespace_makes_empty_value_malformed() {
        // `id: ` trims to `id:`, which no longer carries the separator.
        let text = "[Term]\nid: \n\n";
        assert!(parse_records(text).is_err());
    }

    #[test]
    fn unterminated_trailing_stanza_is_not_flushed() {
        let text = "[Term]\nid: GO:1\nname: n\ndef: d";
        let records = parse_records(text).expect("parse");
        assert!(records.is_empty());
    }

    #[test]
    fn whitespace_only_line_separates_blocks() {
        let text = "[Term]\nid: GO:1\nname: n\ndef: d\n   \n[Term]\nid: GO:2\nname: m\ndef: e\n\n";
        let records = parse_records(text).expect("parse");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn section_kind_does_not_survive_blank_line() {
        // The second block has no header of its own, so it is dropped even
        // though a `[Term]` header appeared earlier in the file.
        let text = "[Term]\nid: GO:1\nname: n\ndef: d\n\nid: GO:2\nname: m\ndef: e\n\n";
        let records = parse_records(text).expect("parse");
        assert_eq!(records.len(), 1);
    }
}
