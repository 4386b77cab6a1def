//! Loading article corpora from JSON / JSONL files.

use crate::error::{IndexError, Result};
use crate::index::{Document, SearchIndex};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub draft: bool,
}

impl Article {
    pub fn href(&self) -> String {
        format!("/articles/{}", self.slug)
    }

    pub fn to_document(&self) -> Document {
        Document::new(self.href(), self.title.clone(), self.description.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusOptions {
    /// Index draft articles too (development mode).
    pub include_drafts: bool,
}

/// Load articles from a `.json` file (array or single object), a `.jsonl`
/// file, or a directory of such files walked in sorted order.
pub fn load_articles(path: impl AsRef<Path>) -> Result<Vec<Article>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut articles = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut articles)?;
        } else {
            read_json(&file, &mut articles)?;
        }
    }
    tracing::info!(path = %path.display(), articles = articles.len(), "loaded corpus");
    Ok(articles)
}

fn open(file: &Path) -> Result<BufReader<File>> {
    File::open(file)
        .map(BufReader::new)
        .map_err(|source| IndexError::Io { path: file.to_path_buf(), source })
}

fn read_jsonl(file: &Path, out: &mut Vec<Article>) -> Result<()> {
    for line in open(file)?.lines() {
        let line = line.map_err(|source| IndexError::Io { path: file.to_path_buf(), source })?;
        if line.trim().is_empty() {
            continue;
        }
        let article = serde_json::from_str(&line).map_err(|source| IndexError::Json { path: file.to_path_buf(), source })?;
        out.push(article);
    }
    Ok(())
}

fn read_json(file: &Path, out: &mut Vec<Article>) -> Result<()> {
    let json_err = |source| IndexError::Json { path: file.to_path_buf(), source };
    let json: serde_json::Value = serde_json::from_reader(open(file)?).map_err(json_err)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                out.push(serde_json::from_value(v).map_err(json_err)?);
            }
        }
        serde_json::Value::Object(_) => out.push(serde_json::from_value(json).map_err(json_err)?),
        _ => tracing::warn!(path = %file.display(), "ignoring JSON that is neither an article nor a list"),
    }
    Ok(())
}

/// Index a batch of articles, skipping drafts unless asked and skipping
/// (with a warning) any article that is not a valid document.
pub fn index_articles(index: &mut SearchIndex, articles: &[Article], opts: CorpusOptions) -> usize {
    let mut indexed = 0;
    for article in articles {
        if article.draft && !opts.include_drafts {
            tracing::debug!(slug = %article.slug, "skipping draft");
            continue;
        }
        match index.index(article.to_document()) {
            Ok(_) => indexed += 1,
            Err(e) => tracing::warn!(slug = %article.slug, error = %e, "skipping article"),
        }
    }
    tracing::info!(indexed, total = articles.len(), "indexed articles");
    indexed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn article(slug: &str, draft: bool) -> Article {
        Article { title: format!("Title {slug}"), slug: slug.into(), description: "about things".into(), draft }
    }

    #[test]
    fn article_maps_to_href() {
        let doc = article("dfs", false).to_document();
        assert_eq!(doc.id, "/articles/dfs");
        assert_eq!(doc.content.as_deref(), Some("about things"));
    }

    #[test]
    fn drafts_skipped_by_default() {
        let articles = vec![article("a", false), article("b", true)];
        let mut index = SearchIndex::new();
        assert_eq!(index_articles(&mut index, &articles, CorpusOptions::default()), 1);
        assert!(!index.contains("/articles/b"));

        let mut dev = SearchIndex::new();
        assert_eq!(index_articles(&mut dev, &articles, CorpusOptions { include_drafts: true }), 2);
    }

    #[test]
    fn loads_json_jsonl_and_directories() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"title":"One","slug":"one","description":"first"},{"title":"Two","slug":"two","draft":true}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.jsonl"), "{\"title\":\"Three\",\"slug\":\"three\"}\n\n").unwrap();
        fs::write(dir.path().join("ignored.txt"), "not json").unwrap();

        let all = load_articles(dir.path()).unwrap();
        let slugs: Vec<_> = all.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["one", "two", "three"]);
        assert!(all[1].draft);
        assert_eq!(all[2].description, "");

        let single = load_articles(dir.path().join("b.jsonl")).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, "{not json").unwrap();
        assert!(matches!(load_articles(&file), Err(IndexError::Json { .. })));
        assert!(matches!(load_articles(dir.path().join("missing.json")), Err(IndexError::Io { .. })));
    }
}
