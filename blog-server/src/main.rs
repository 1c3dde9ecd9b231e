//! blog-server - JSON post server for the Blogcast remote backend

use std::path::PathBuf;

use anyhow::Context;
use blog_server::PostStore;
use clap::Parser;
use libblog::logging::{LogFormat, LoggingConfig};
use libblog::types::seed_posts;

#[derive(Parser, Debug)]
#[command(name = "blog-server")]
#[command(about = "Serve Blogcast posts over HTTP", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON database file, rewritten after every change (in-memory if omitted)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Start an in-memory store with the test post
    #[arg(long, conflicts_with = "db")]
    seed: bool,

    /// Log format (text, json or pretty)
    #[arg(long, env = "BLOG_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level
    #[arg(long, env = "BLOG_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    LoggingConfig::new(cli.log_format, cli.log_level.clone(), cli.verbose)
        .init()
        .context("Failed to initialize logging")?;

    let store = match &cli.db {
        Some(path) => PostStore::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?,
        None if cli.seed => PostStore::new(seed_posts()),
        None => PostStore::new(Vec::new()),
    };

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "blog-server listening");

    blog_server::serve(listener, store, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutting down");
    })
    .await?;

    Ok(())
}
