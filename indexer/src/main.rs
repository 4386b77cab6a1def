use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use quickfind_core::{highlight, index_articles, load_articles, CorpusOptions, Field, SearchConfig, SearchHit, SearchIndex};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory article index and query it", long_about = None)]
struct Cli {
    /// Input path (JSON/JSONL file or directory of them)
    #[arg(long)]
    input: String,
    /// Index draft articles as well
    #[arg(long, default_value_t = false)]
    include_drafts: bool,
    #[command(flatten)]
    search: SearchArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SearchArgs {
    /// Minimum trimmed query length before searching
    #[arg(long, default_value_t = 2)]
    min_query_len: usize,
    /// Maximum number of results
    #[arg(long, default_value_t = 5)]
    result_cap: usize,
    /// Characters of context on each side of a snippet match
    #[arg(long, default_value_t = 50)]
    snippet_radius: usize,
    /// Length of the leading excerpt when the query is not found
    #[arg(long, default_value_t = 100)]
    excerpt_len: usize,
}

impl From<&SearchArgs> for SearchConfig {
    fn from(a: &SearchArgs) -> Self {
        SearchConfig::default()
            .with_min_query_len(a.min_query_len)
            .with_result_cap(a.result_cap)
            .with_snippet_radius(a.snippet_radius)
            .with_excerpt_len(a.excerpt_len)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print document and term counts
    Stats,
    /// Run a single query
    Query {
        /// Query text
        q: String,
    },
    /// Read queries from stdin, one per line
    Repl,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let articles = load_articles(&cli.input)?;
    let mut index = SearchIndex::with_config(SearchConfig::from(&cli.search));
    index_articles(&mut index, &articles, CorpusOptions { include_drafts: cli.include_drafts });

    match cli.command {
        Commands::Stats => {
            println!("documents: {}", index.len());
            println!("title terms: {}", index.term_count(Field::Title));
            println!("content terms: {}", index.term_count(Field::Content));
        }
        Commands::Query { q } => print_hits(&mut io::stdout().lock(), &q, &index.search(&q))?,
        Commands::Repl => repl(&index)?,
    }
    Ok(())
}

fn repl(index: &SearchIndex) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    write!(out, "> ")?;
    out.flush()?;
    for line in stdin.lock().lines() {
        let q = line?;
        let start = std::time::Instant::now();
        let hits = index.search(&q);
        tracing::debug!(query = %q, hits = hits.len(), took_s = start.elapsed().as_secs_f64(), "search");
        print_hits(&mut out, &q, &hits)?;
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

fn print_hits(out: &mut impl Write, query: &str, hits: &[SearchHit]) -> Result<()> {
    if hits.is_empty() {
        writeln!(out, "No results found.")?;
        return Ok(());
    }
    for (rank, hit) in hits.iter().enumerate() {
        writeln!(out, "{}. {}  ({})", rank + 1, hit.title, hit.id)?;
        if let Some(snippet) = &hit.snippet {
            writeln!(out, "   {}", highlight(snippet, query).render("**", "**"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickfind_core::Document;

    #[test]
    fn prints_ranked_hits_with_highlight() {
        let mut index = SearchIndex::new();
        index.index(Document::new("/articles/dfs", "Depth First Search", "DFS goes deep first")).unwrap();
        let hits = index.search("deep");
        let mut buf = Vec::new();
        print_hits(&mut buf, "deep", &hits).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("1. Depth First Search  (/articles/dfs)"));
        assert!(text.contains("DFS goes **deep** first"));
    }

    #[test]
    fn prints_empty_message() {
        let mut buf = Vec::new();
        print_hits(&mut buf, "zz", &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No results found.\n");
    }

    #[test]
    fn cli_flags_map_to_config() {
        let cli = Cli::parse_from(["indexer", "--input", "x.json", "--result-cap", "3", "query", "rust"]);
        let cfg = SearchConfig::from(&cli.search);
        assert_eq!(cfg.result_cap, 3);
        assert_eq!(cfg.min_query_len, 2);
        assert!(matches!(cli.command, Commands::Query { ref q } if q == "rust"));
    }
}
