pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod search;
pub mod shared;
pub mod snippet;
pub mod tokenizer;

pub use config::SearchConfig;
pub use corpus::{index_articles, load_articles, Article, CorpusOptions};
pub use error::{IndexError, Result};
pub use index::{DocId, Document, Field, SearchIndex, StoredDoc};
pub use search::SearchHit;
pub use shared::SharedIndex;
pub use snippet::{highlight, snippet, snippet_with, Highlighted};
