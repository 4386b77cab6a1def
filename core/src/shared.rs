use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::{DocId, Document, SearchIndex, StoredDoc};
use crate::search::SearchHit;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to one index shared between threads. Writes take the
/// exclusive lock, searches the shared one.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<SearchIndex>>,
}

impl SharedIndex {
    pub fn new(index: SearchIndex) -> Self {
        Self { inner: Arc::new(RwLock::new(index)) }
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self::new(SearchIndex::with_config(config))
    }

    pub fn index(&self, doc: Document) -> Result<DocId> {
        self.inner.write().index(doc)
    }

    /// Index a batch under one write lock. The batch is all-or-nothing: if
    /// any document is invalid, nothing is indexed.
    pub fn index_batch(&self, docs: impl IntoIterator<Item = Document>) -> Result<usize> {
        let docs: Vec<Document> = docs.into_iter().collect();
        for doc in &docs {
            doc.validate()?;
        }
        let n = docs.len();
        let mut guard = self.inner.write();
        for doc in docs {
            guard.index(doc)?;
        }
        Ok(n)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.inner.write().remove(id)
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.inner.read().search(query)
    }

    pub fn get(&self, id: &str) -> Option<StoredDoc> {
        self.inner.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run a closure against the index under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&SearchIndex) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }
}
