use quickfind_core::{snippet, Document, SearchIndex};

fn ids(index: &SearchIndex, q: &str) -> Vec<String> {
    index.search(q).into_iter().map(|h| h.id).collect()
}

#[test]
fn reindexing_replaces_previous_version() {
    let mut index = SearchIndex::new();
    index.index(Document::new("/articles/bfs", "Breadth First", "queue based traversal")).unwrap();
    index.index(Document::new("/articles/bfs", "Breadth First", "level order walk")).unwrap();

    let hits = index.search("breadth");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].snippet.as_deref(), Some("level order walk..."));
    assert!(index.search("queue").is_empty());
    assert_eq!(ids(&index, "walk"), vec!["/articles/bfs"]);
}

#[test]
fn repeated_searches_are_identical() {
    let mut index = SearchIndex::new();
    for i in 0..12 {
        index.index(Document::new(format!("/n/{i}"), format!("Note {i}"), "note body text")).unwrap();
    }
    let first = index.search("note text");
    let second = index.search("note text");
    assert_eq!(first, second);
}

#[test]
fn results_are_capped_at_five_in_priority_order() {
    let mut index = SearchIndex::new();
    for i in 0..4 {
        index.index(Document::new(format!("/content/{i}"), format!("Doc {i}"), "mentions graphs")).unwrap();
    }
    for i in 0..4 {
        index.index(Document::new(format!("/title/{i}"), format!("Graphs {i}"), "nothing")).unwrap();
    }
    let got = ids(&index, "graphs");
    assert_eq!(got, vec!["/title/0", "/title/1", "/title/2", "/title/3", "/content/0"]);
}

#[test]
fn single_character_query_returns_nothing() {
    let mut index = SearchIndex::new();
    index.index(Document::new("/a", "a b c", "a a a")).unwrap();
    assert!(index.search("a").is_empty());
}

#[test]
fn snippet_surrounds_the_match() {
    let s = snippet("the quick brown fox jumps", "brown");
    assert!(s.contains("quick brown fox"));
    assert!(!s.starts_with("..."));

    let long = format!("the quick brown fox jumps {}", "over the lazy dog ".repeat(5));
    let s = snippet(&long, "brown");
    assert!(s.contains("quick brown fox"));
    assert!(!s.starts_with("..."));
    assert!(s.ends_with("..."));
}

#[test]
fn snippet_falls_back_to_leading_excerpt() {
    let content: String = "abcdefghij".repeat(20);
    assert_eq!(content.len(), 200);
    assert_eq!(snippet(&content, "xyz"), format!("{}...", &content[..100]));
}

#[test]
fn title_match_outranks_content_match() {
    let mut index = SearchIndex::new();
    index.index(Document::new("/content-only", "Unrelated", "all about recursion")).unwrap();
    index.index(Document::new("/title-only", "Recursion Basics", "calls itself")).unwrap();
    assert_eq!(ids(&index, "recursion"), vec!["/title-only", "/content-only"]);
}

#[test]
fn document_without_content_is_title_only() {
    let mut index = SearchIndex::new();
    index.index(Document::without_content("/bare", "Dynamic Programming")).unwrap();
    assert_eq!(ids(&index, "dyn"), vec!["/bare"]);
    assert!(index.search("programming").iter().all(|h| h.snippet.is_none()));
    // content-only words never come from the title
    index.index(Document::new("/full", "Other", "memoization")).unwrap();
    assert_eq!(ids(&index, "memoization"), vec!["/full"]);
}

#[test]
fn odd_queries_never_fail() {
    let mut index = SearchIndex::new();
    index.index(Document::new("/a", "Alpha", "beta")).unwrap();
    for q in ["", "   ", "\n\t", "ΣΣΣ", &"x".repeat(10_000), "(?:[", "al"] {
        let _ = index.search(q);
    }
}
