//! Result previews: a bounded context window around the first query match,
//! plus first-match highlighting for display.

use crate::config::SearchConfig;

const ELLIPSIS: &str = "...";

/// Character span `[start, end)` of the first case-insensitive occurrence of
/// `needle` in `haystack`. An empty needle matches at offset 0.
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Some((0, 0));
    }
    // lowering may expand one char into several; remember where each came from
    let mut lowered = Vec::new();
    let mut origin = Vec::new();
    for (pos, c) in haystack.chars().enumerate() {
        for lc in c.to_lowercase() {
            lowered.push(lc);
            origin.push(pos);
        }
    }
    lowered
        .windows(needle.len())
        .position(|w| w == needle.as_slice())
        .map(|p| (origin[p], origin[p + needle.len() - 1] + 1))
}

/// Snippet with the default radius and excerpt length.
pub fn snippet(content: &str, query: &str) -> String {
    snippet_with(content, query, &SearchConfig::default())
}

/// Context window around the first match of the raw query, or a leading
/// excerpt when there is none. Blank content yields an empty string.
pub fn snippet_with(content: &str, query: &str, config: &SearchConfig) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    let chars: Vec<char> = content.chars().collect();
    match find_case_insensitive(content, query) {
        Some((start, _)) => {
            let from = start.saturating_sub(config.snippet_radius);
            let to = start
                .saturating_add(query.chars().count())
                .saturating_add(config.snippet_radius)
                .min(chars.len());
            let mut out = String::new();
            if from > 0 {
                out.push_str(ELLIPSIS);
            }
            out.extend(&chars[from..to]);
            if to < chars.len() {
                out.push_str(ELLIPSIS);
            }
            out
        }
        None => {
            let mut out: String = chars.iter().take(config.excerpt_len).collect();
            out.push_str(ELLIPSIS);
            out
        }
    }
}

/// Text split around its first case-insensitive query match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub before: String,
    pub matched: String,
    pub after: String,
}

impl Highlighted {
    pub fn has_match(&self) -> bool { !self.matched.is_empty() }

    /// Wrap the match in `open`/`close` markers.
    pub fn render(&self, open: &str, close: &str) -> String {
        if !self.has_match() {
            return format!("{}{}", self.before, self.after);
        }
        format!("{}{open}{}{close}{}", self.before, self.matched, self.after)
    }
}

/// Split `text` around the first query match, using the same matching rules
/// as snippet extraction.
pub fn highlight(text: &str, query: &str) -> Highlighted {
    let span = if query.is_empty() { None } else { find_case_insensitive(text, query) };
    let Some((start, end)) = span else {
        return Highlighted { before: text.to_string(), matched: String::new(), after: String::new() };
    };
    let byte_at = |pos: usize| text.char_indices().nth(pos).map_or(text.len(), |(i, _)| i);
    let (from, to) = (byte_at(start), byte_at(end));
    Highlighted {
        before: text[..from].to_string(),
        matched: text[from..to].to_string(),
        after: text[to..].to_string(),
    }
}
