use crate::index::{DocId, Field, SearchIndex};
use crate::snippet::snippet_with;
use crate::tokenizer::{normalize, words};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SearchIndex {
    /// Ranked, deduplicated hits for a raw query.
    ///
    /// Query words are OR-ed across both fields. Title matches rank above
    /// content-only matches; within a field documents keep first-seen order.
    /// The result is capped at `result_cap` and carries a snippet built from
    /// the untrimmed query.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let config = self.config();
        if normalize(query).trim().chars().count() < config.min_query_len {
            return Vec::new();
        }

        let terms = words(query);
        let mut fields = Field::ALL;
        fields.sort_by_key(|f| Reverse(f.weight()));

        let mut seen: HashSet<DocId> = HashSet::new();
        let mut ranked: Vec<DocId> = Vec::new();
        for field in fields {
            // BTreeSet fixes the order to DocId, i.e. first-seen order
            let mut matched: BTreeSet<DocId> = BTreeSet::new();
            for term in &terms {
                if let Some(postings) = self.postings(field, term) {
                    matched.extend(postings.iter().copied());
                }
            }
            ranked.extend(matched.into_iter().filter(|d| seen.insert(*d)));
        }

        ranked
            .into_iter()
            .filter_map(|doc_id| {
                let Some(doc) = self.doc(doc_id) else {
                    tracing::warn!(doc_id, "posting references a missing document, skipping");
                    return None;
                };
                let snippet = snippet_with(&doc.content, query, config);
                Some(SearchHit {
                    id: doc.external_id.clone(),
                    title: doc.title.clone(),
                    snippet: (!snippet.is_empty()).then_some(snippet),
                })
            })
            .take(config.result_cap)
            .collect()
    }
}
