use crate::config::SearchConfig;
use crate::error::{IndexError, Result};
use crate::tokenizer::{exact_tokens, prefix_tokens};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Internal document number, assigned in first-seen order and never reused
/// for a different external id.
pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
}

impl Field {
    /// Fields in ranking priority order.
    pub const ALL: [Field; 2] = [Field::Title, Field::Content];

    /// Title gets prefix tokens for type-ahead, content gets whole words.
    pub fn tokenize(self, text: &str) -> Vec<String> {
        match self {
            Field::Title => prefix_tokens(text),
            Field::Content => exact_tokens(text),
        }
    }

    /// Relative importance; a higher weight ranks first.
    pub fn weight(self) -> u32 {
        match self {
            Field::Title => 2,
            Field::Content => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable external identifier (the href).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), content: Some(content.into()) }
    }

    pub fn without_content(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), content: None }
    }

    /// A document needs a non-blank id to be indexed.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(IndexError::InvalidDocument { reason: "document id is empty".into() });
        }
        Ok(())
    }

    /// Content that takes part in indexing; blank content counts as absent.
    pub fn indexable_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Text kept per document for display and snippet extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredDoc {
    #[serde(rename = "id")]
    pub external_id: String,
    pub title: String,
    /// Empty when the document had no indexable content.
    pub content: String,
}

#[derive(Debug, Default)]
pub struct SearchIndex {
    title_postings: HashMap<String, BTreeSet<DocId>>,
    content_postings: HashMap<String, BTreeSet<DocId>>,
    docs: HashMap<DocId, StoredDoc>,
    doc_id_map: HashMap<String, DocId>,
    /// Reverse index used to drop a document's postings on replace/remove.
    doc_terms: HashMap<DocId, Vec<(Field, String)>>,
    next_doc_id: DocId,
    config: SearchConfig,
}

impl SearchIndex {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    /// Insert a document, replacing every posting of an earlier version with
    /// the same id. A replaced document keeps its original `DocId`.
    pub fn index(&mut self, doc: Document) -> Result<DocId> {
        doc.validate()?;

        let doc_id = match self.doc_id_map.get(&doc.id) {
            Some(&existing) => {
                self.drop_postings(existing);
                existing
            }
            None => {
                let id = self.next_doc_id;
                self.next_doc_id += 1;
                self.doc_id_map.insert(doc.id.clone(), id);
                id
            }
        };

        let content = doc.indexable_content().unwrap_or_default().to_string();
        let mut terms = Vec::new();
        for token in Field::Title.tokenize(&doc.title) {
            self.title_postings.entry(token.clone()).or_default().insert(doc_id);
            terms.push((Field::Title, token));
        }
        for token in Field::Content.tokenize(&content) {
            self.content_postings.entry(token.clone()).or_default().insert(doc_id);
            terms.push((Field::Content, token));
        }
        tracing::debug!(id = %doc.id, doc_id, terms = terms.len(), "indexed document");
        self.doc_terms.insert(doc_id, terms);

        self.docs.insert(doc_id, StoredDoc { external_id: doc.id, title: doc.title, content });
        Ok(doc_id)
    }

    /// Remove a document and all of its postings. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(doc_id) = self.doc_id_map.remove(id) else {
            return false;
        };
        self.drop_postings(doc_id);
        self.docs.remove(&doc_id);
        true
    }

    fn drop_postings(&mut self, doc_id: DocId) {
        let Some(terms) = self.doc_terms.remove(&doc_id) else {
            return;
        };
        for (field, token) in terms {
            let postings = self.postings_mut(field);
            if let Some(set) = postings.get_mut(&token) {
                set.remove(&doc_id);
                if set.is_empty() {
                    postings.remove(&token);
                }
            }
        }
    }

    fn postings_mut(&mut self, field: Field) -> &mut HashMap<String, BTreeSet<DocId>> {
        match field {
            Field::Title => &mut self.title_postings,
            Field::Content => &mut self.content_postings,
        }
    }

    /// Posting list for one token in one field, iterated in first-seen order.
    pub fn postings(&self, field: Field, token: &str) -> Option<&BTreeSet<DocId>> {
        match field {
            Field::Title => self.title_postings.get(token),
            Field::Content => self.content_postings.get(token),
        }
    }

    pub fn doc(&self, doc_id: DocId) -> Option<&StoredDoc> { self.docs.get(&doc_id) }

    pub fn get(&self, id: &str) -> Option<&StoredDoc> {
        self.doc_id_map.get(id).and_then(|d| self.docs.get(d))
    }

    pub fn contains(&self, id: &str) -> bool { self.doc_id_map.contains_key(id) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Number of distinct tokens indexed for a field.
    pub fn term_count(&self, field: Field) -> usize {
        match field {
            Field::Title => self.title_postings.len(),
            Field::Content => self.content_postings.len(),
        }
    }
}
