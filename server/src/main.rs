use anyhow::Result;
use axum::Router;
use cinematch_core::{EngineConfig, IndexConfig};
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Catalog CSV with "Movie Name" and "Storyline" columns
    #[arg(long, default_value = "imdb_storylines_cleaned.csv")]
    catalog: String,
    /// Maximum vocabulary size
    #[arg(long, default_value_t = 5000)]
    max_features: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = EngineConfig {
        index: IndexConfig { max_features: Some(args.max_features), ..IndexConfig::default() },
        ..EngineConfig::default()
    };
    let app: Router = build_app(&args.catalog, config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, catalog = %args.catalog, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
