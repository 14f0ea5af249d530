//! In-memory program representation consumed and produced by a rename run.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, RenameError};

use super::symbol::{DocumentId, SourceLocation, TextSpan};

/// A single source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// File name relative to the project root; also used in diagnostics.
    pub name: String,
    pub text: Arc<str>,
}

impl Document {
    pub fn new(id: DocumentId, name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
            text: text.into(),
        }
    }

    /// Text covered by `span`, if the span lies on character boundaries.
    pub fn slice(&self, span: TextSpan) -> Option<&str> {
        self.text.get(span.start..span.end)
    }
}

/// Ordered set of documents making up the program.
///
/// Renaming never mutates a `Program`; it produces a new one, so a failed run
/// leaves the caller holding the original text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    documents: IndexMap<DocumentId, Document>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document; ids must be unique.
    pub fn add_document(&mut self, document: Document) -> Result<()> {
        if self.documents.contains_key(&document.id) {
            return Err(RenameError::validation_field(
                format!("duplicate document id {}", document.id),
                "documents",
            ));
        }
        self.documents.insert(document.id, document);
        Ok(())
    }

    pub fn document(&self, id: DocumentId) -> Result<&Document> {
        self.documents
            .get(&id)
            .ok_or_else(|| RenameError::unknown_document(id))
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Original text at a source location.
    pub fn text_at(&self, location: &SourceLocation) -> Result<&str> {
        let document = self.document(location.document)?;
        document.slice(location.span).ok_or_else(|| {
            RenameError::validation(format!(
                "span {} is outside of {} or splits a character",
                location.span, document.name
            ))
        })
    }

    /// Copy of this program with each document in `texts` replaced by its new
    /// version; documents not mentioned are carried over unchanged.
    pub(crate) fn with_document_texts(
        &self,
        texts: impl IntoIterator<Item = (DocumentId, String)>,
    ) -> Result<Self> {
        let mut next = self.clone();
        for (id, text) in texts {
            let document = next
                .documents
                .get_mut(&id)
                .ok_or_else(|| RenameError::unknown_document(id))?;
            document.text = text.into();
        }
        Ok(next)
    }
}

impl FromIterator<Document> for Program {
    /// Later documents with a repeated id replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().map(|doc| (doc.id, doc)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_document_ids_are_rejected() {
        let mut program = Program::new();
        program
            .add_document(Document::new(DocumentId(1), "A.cs", "class A {}"))
            .unwrap();
        let err = program
            .add_document(Document::new(DocumentId(1), "B.cs", "class B {}"))
            .unwrap_err();
        assert!(matches!(err, RenameError::Validation { .. }));
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn text_at_rejects_spans_splitting_characters() {
        let program: Program = [Document::new(DocumentId(0), "Ω.cs", "int Ω;")]
            .into_iter()
            .collect();
        let ok = SourceLocation::new(DocumentId(0), TextSpan::new(4, 6));
        assert_eq!(program.text_at(&ok).unwrap(), "Ω");
        let split = SourceLocation::new(DocumentId(0), TextSpan::new(4, 5));
        assert!(program.text_at(&split).is_err());
    }

    #[test]
    fn with_document_texts_leaves_original_untouched() {
        let program: Program = [
            Document::new(DocumentId(0), "A.cs", "old"),
            Document::new(DocumentId(1), "B.cs", "same"),
        ]
        .into_iter()
        .collect();
        let next = program
            .with_document_texts([(DocumentId(0), "new".to_string())])
            .unwrap();
        assert_eq!(&*program.document(DocumentId(0)).unwrap().text, "old");
        assert_eq!(&*next.document(DocumentId(0)).unwrap().text, "new");
        assert_eq!(&*next.document(DocumentId(1)).unwrap().text, "same");
        assert!(program
            .with_document_texts([(DocumentId(5), String::new())])
            .is_err());
    }
}
