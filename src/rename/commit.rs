//! Conflict check and batched application of proposed renames.
//!
//! Nothing is edited until every proposal of the run has been validated: a
//! single contested location aborts the commit and the input program is
//! returned to the caller untouched.

use std::collections::BTreeMap;

use tracing::{error, info};

use crate::core::errors::{Result, RenameError};

use super::ledger::LedgerEntries;
use super::program::{Document, Program};
use super::progress::ProgressSink;
use super::symbol::{DocumentId, SourceLocation, TextSpan};

/// A single replacement within one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: TextSpan,
    pub new_text: String,
}

/// Validated, non-overlapping edits grouped per document, ordered by span.
#[derive(Debug, Clone, Default)]
pub struct EditPlan {
    edits: BTreeMap<DocumentId, Vec<TextEdit>>,
    duplicates: usize,
}

impl EditPlan {
    pub fn edits_for(&self, document: DocumentId) -> &[TextEdit] {
        self.edits.get(&document).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.edits.keys().copied()
    }

    /// Number of edits across all documents.
    pub fn len(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Proposals that repeated an already accepted (location, name) pair.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Produce the renamed program: one batched rewrite per edited document.
    pub fn apply(&self, program: &Program) -> Result<Program> {
        let mut texts = Vec::with_capacity(self.edits.len());
        for (id, edits) in &self.edits {
            let document = program.document(*id)?;
            texts.push((*id, apply_edits(document, edits)?));
        }
        program.with_document_texts(texts)
    }
}

/// Validate the ledger against `program` and turn it into an [`EditPlan`].
///
/// Every conflicting location is logged; the first one (by document, then
/// span) is returned as [`RenameError::RenameConflict`].
pub fn plan_edits(
    program: &Program,
    entries: &LedgerEntries,
    progress: &dyn ProgressSink,
) -> Result<EditPlan> {
    let mut ordered: Vec<(&SourceLocation, _)> = entries.iter().collect();
    ordered.sort_unstable_by_key(|(location, _)| **location);

    let mut plan = EditPlan {
        duplicates: entries.recorded().saturating_sub(entries.len()),
        ..EditPlan::default()
    };
    let mut first_conflict = None;
    let mut conflicts = 0usize;

    for (location, names) in ordered {
        progress.report(1);
        let document = program.document(location.document)?;

        if names.len() > 1 {
            conflicts += 1;
            let original_text = document
                .slice(location.span)
                .unwrap_or("<invalid span>")
                .to_string();
            let candidates: Vec<String> = names.iter().cloned().collect();
            error!(
                document = %document.name,
                span = %location.span,
                original = %original_text,
                candidates = ?candidates,
                "conflicting renames"
            );
            first_conflict.get_or_insert(RenameError::RenameConflict {
                document: document.name.clone(),
                span: location.span,
                original_text,
                candidates,
            });
            continue;
        }

        if let Some(name) = names.first() {
            plan.edits
                .entry(location.document)
                .or_default()
                .push(TextEdit {
                    span: location.span,
                    new_text: name.clone(),
                });
        }
    }

    if let Some(conflict) = first_conflict {
        error!(conflicts, "rename aborted, no document was modified");
        return Err(conflict);
    }

    for (id, edits) in &plan.edits {
        validate_edits(program.document(*id)?, edits)?;
    }

    Ok(plan)
}

/// Run the full commit stage: plan, then apply as one batch per document.
pub fn commit(
    program: &Program,
    entries: &LedgerEntries,
    progress: &dyn ProgressSink,
) -> Result<(Program, EditPlan)> {
    progress.set_message("committing renames");
    let plan = plan_edits(program, entries, progress)?;
    let renamed = plan.apply(program)?;
    info!(
        edits = plan.len(),
        documents = plan.edits.len(),
        duplicates = plan.duplicates(),
        "renames committed"
    );
    Ok((renamed, plan))
}

/// Edits must be non-empty, lie inside the document on character boundaries
/// and must not share bytes with each other. `edits` is sorted by span.
fn validate_edits(document: &Document, edits: &[TextEdit]) -> Result<()> {
    for edit in edits {
        if edit.span.is_empty() {
            return Err(RenameError::validation(format!(
                "{}: edit span {} is empty",
                document.name, edit.span
            )));
        }
        if document.slice(edit.span).is_none() {
            return Err(RenameError::validation(format!(
                "{}: edit span {} is outside the document or splits a character",
                document.name, edit.span
            )));
        }
    }
    for pair in edits.windows(2) {
        if pair[0].span.end > pair[1].span.start {
            return Err(RenameError::OverlappingEdits {
                document: document.name.clone(),
                first: pair[0].span,
                second: pair[1].span,
            });
        }
    }
    Ok(())
}

fn apply_edits(document: &Document, edits: &[TextEdit]) -> Result<String> {
    let text = &*document.text;
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        let keep = text.get(cursor..edit.span.start).ok_or_else(|| {
            RenameError::internal(format!(
                "{}: edit at {} precedes previous edit",
                document.name, edit.span
            ))
        })?;
        out.push_str(keep);
        out.push_str(&edit.new_text);
        cursor = edit.span.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::progress::{NoProgress, ProgressCounter};
    use crate::rename::symbol::RenameProposal;

    fn program() -> Program {
        [
            Document::new(DocumentId(0), "Ship.cs", "class Ship { int fuel; }"),
            Document::new(DocumentId(1), "Dock.cs", "Ship s = new Ship();"),
        ]
        .into_iter()
        .collect()
    }

    fn proposal(doc: u32, start: usize, end: usize, name: &str) -> RenameProposal {
        RenameProposal {
            location: SourceLocation::new(DocumentId(doc), TextSpan::new(start, end)),
            name: name.to_string(),
        }
    }

    #[test]
    fn applies_edits_per_document() {
        let entries = LedgerEntries::from_proposals([
            proposal(0, 6, 10, "A"),
            proposal(0, 17, 21, "B"),
            proposal(1, 0, 4, "A"),
            proposal(1, 13, 17, "A"),
        ]);
        let (renamed, plan) = commit(&program(), &entries, &NoProgress).unwrap();
        assert_eq!(plan.len(), 4);
        assert_eq!(
            &*renamed.document(DocumentId(0)).unwrap().text,
            "class A { int B; }"
        );
        assert_eq!(
            &*renamed.document(DocumentId(1)).unwrap().text,
            "A s = new A();"
        );
    }

    #[test]
    fn conflict_aborts_without_touching_any_document() {
        let original = program();
        let entries = LedgerEntries::from_proposals([
            proposal(1, 0, 4, "A"),
            proposal(0, 6, 10, "Ω"),
            proposal(0, 6, 10, "Δ"),
        ]);
        let err = commit(&original, &entries, &NoProgress).unwrap_err();
        match err {
            RenameError::RenameConflict {
                document,
                span,
                original_text,
                candidates,
            } => {
                assert_eq!(document, "Ship.cs");
                assert_eq!(span, TextSpan::new(6, 10));
                assert_eq!(original_text, "Ship");
                assert_eq!(candidates, vec!["Ω".to_string(), "Δ".to_string()]);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(original, program());
    }

    #[test]
    fn identical_duplicates_apply_once() {
        let entries = LedgerEntries::from_proposals([
            proposal(0, 6, 10, "Ω"),
            proposal(0, 6, 10, "Ω"),
        ]);
        let plan = plan_edits(&program(), &entries, &NoProgress).unwrap();
        assert_eq!(plan.edits_for(DocumentId(0)).len(), 1);
        assert_eq!(plan.duplicates(), 1);
        let renamed = plan.apply(&program()).unwrap();
        assert_eq!(
            &*renamed.document(DocumentId(0)).unwrap().text,
            "class Ω { int fuel; }"
        );
    }

    #[test]
    fn overlapping_spans_are_rejected() {
        let entries = LedgerEntries::from_proposals([
            proposal(0, 6, 10, "A"),
            proposal(0, 8, 12, "B"),
        ]);
        let err = plan_edits(&program(), &entries, &NoProgress).unwrap_err();
        assert!(matches!(err, RenameError::OverlappingEdits { .. }));
    }

    #[test]
    fn empty_span_at_the_start_of_another_edit_is_rejected() {
        let entries = LedgerEntries::from_proposals([
            proposal(0, 6, 6, "A"),
            proposal(0, 6, 10, "B"),
        ]);
        let original = program();
        let err = commit(&original, &entries, &NoProgress).unwrap_err();
        assert!(matches!(err, RenameError::Validation { ref message, .. } if message.contains("empty")));
        assert_eq!(original, program());
    }

    #[test]
    fn spans_outside_the_document_are_rejected() {
        let entries = LedgerEntries::from_proposals([proposal(1, 18, 40, "A")]);
        let err = plan_edits(&program(), &entries, &NoProgress).unwrap_err();
        assert!(matches!(err, RenameError::Validation { .. }));
    }

    #[test]
    fn unknown_documents_are_reported() {
        let entries = LedgerEntries::from_proposals([proposal(9, 0, 1, "A")]);
        let err = plan_edits(&program(), &entries, &NoProgress).unwrap_err();
        assert!(matches!(err, RenameError::UnknownDocument { .. }));
    }

    #[test]
    fn untouched_documents_are_carried_over() {
        let entries = LedgerEntries::from_proposals([proposal(0, 6, 10, "A")]);
        let counter = ProgressCounter::new();
        let (renamed, plan) = commit(&program(), &entries, &counter).unwrap();
        assert_eq!(plan.documents().collect::<Vec<_>>(), vec![DocumentId(0)]);
        assert_eq!(
            &*renamed.document(DocumentId(1)).unwrap().text,
            "Ship s = new Ship();"
        );
        assert_eq!(counter.completed(), 1);
        assert_eq!(counter.message().as_deref(), Some("committing renames"));
    }
}
