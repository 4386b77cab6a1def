use std::collections::HashSet;

/// Lowercase text the same way for indexing and querying.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Whitespace-delimited words of the normalized text.
pub fn words(text: &str) -> Vec<String> {
    normalize(text).split_whitespace().map(str::to_string).collect()
}

/// Exact policy: every distinct word, in first-occurrence order.
pub fn exact_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    words(text).into_iter().filter(|w| seen.insert(w.clone())).collect()
}

/// Prefix policy: every prefix (length 1..=n chars) of every distinct word.
pub fn prefix_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    for word in words(text) {
        // prefix ends on char boundaries so multi-byte letters stay whole
        let ends = word.char_indices().skip(1).map(|(i, _)| i).chain(std::iter::once(word.len()));
        for end in ends {
            let prefix = &word[..end];
            if seen.insert(prefix.to_string()) {
                tokens.push(prefix.to_string());
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lowercases_and_dedupes() {
        let t = exact_tokens("Rust rust  RUST\tsearch");
        assert_eq!(t, vec!["rust", "search"]);
    }

    #[test]
    fn prefix_emits_every_prefix() {
        let t = prefix_tokens("Fox");
        assert_eq!(t, vec!["f", "fo", "fox"]);
    }

    #[test]
    fn prefix_shares_prefixes_across_words() {
        let t = prefix_tokens("go golang");
        assert_eq!(t, vec!["g", "go", "gol", "gola", "golan", "golang"]);
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        let t = prefix_tokens("Café");
        assert_eq!(t, vec!["c", "ca", "caf", "café"]);
    }

    #[test]
    fn blank_text_yields_nothing() {
        assert!(exact_tokens("   \n ").is_empty());
        assert!(prefix_tokens("").is_empty());
    }
}
