use anyhow::Result;
use axum::Router;
use clap::Parser;
use quickfind_core::{CorpusOptions, SearchConfig};
use server::{build_app, load_index};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Article corpus (JSON/JSONL file or directory)
    #[arg(long, default_value = "./content")]
    input: String,
    /// Index draft articles as well
    #[arg(long, default_value_t = false)]
    include_drafts: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
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

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = SearchConfig::default()
        .with_min_query_len(args.min_query_len)
        .with_result_cap(args.result_cap)
        .with_snippet_radius(args.snippet_radius)
        .with_excerpt_len(args.excerpt_len);
    let index = load_index(&args.input, CorpusOptions { include_drafts: args.include_drafts }, config)?;
    tracing::info!(documents = index.len(), "index ready");
    let app: Router = build_app(index);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
