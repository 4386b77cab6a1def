use serde::{Deserialize, Serialize};

fn default_min_query_len() -> usize { 2 }
fn default_result_cap() -> usize { 5 }
fn default_snippet_radius() -> usize { 50 }
fn default_excerpt_len() -> usize { 100 }

/// Query-time knobs. All lengths are in characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Trimmed queries shorter than this return no results.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Maximum number of hits returned by a search.
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,
    /// Context kept on each side of a snippet match.
    #[serde(default = "default_snippet_radius")]
    pub snippet_radius: usize,
    /// Leading excerpt length used when the query does not occur in the content.
    #[serde(default = "default_excerpt_len")]
    pub excerpt_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            result_cap: default_result_cap(),
            snippet_radius: default_snippet_radius(),
            excerpt_len: default_excerpt_len(),
        }
    }
}

impl SearchConfig {
    pub fn with_min_query_len(mut self, n: usize) -> Self { self.min_query_len = n; self }
    pub fn with_result_cap(mut self, n: usize) -> Self { self.result_cap = n; self }
    pub fn with_snippet_radius(mut self, n: usize) -> Self { self.snippet_radius = n; self }
    pub fn with_excerpt_len(mut self, n: usize) -> Self { self.excerpt_len = n; self }
}
