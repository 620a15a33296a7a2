use anyhow::Result;
use cinematch_core::{EngineConfig, IndexConfig, IndexStats, Recommendation, RecommendationEngine};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Recommend movies by title or storyline from a CSV catalog", long_about = None)]
struct Cli {
    /// Catalog CSV with "Movie Name" and "Storyline" columns
    #[arg(long, global = true, default_value = "imdb_storylines_cleaned.csv")]
    catalog: String,
    /// Maximum vocabulary size
    #[arg(long, global = true, default_value_t = 5000)]
    max_features: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print catalog and index statistics
    Stats,
    /// Recommend movies with plots similar to the closest matching title
    Title {
        title: String,
        #[arg(long, default_value_t = 10)]
        top_n: usize,
    },
    /// Recommend movies with plots similar to a free-text storyline
    Storyline {
        text: String,
        #[arg(long, default_value_t = 10)]
        top_n: usize,
    },
    /// List catalog titles close to the input
    Suggest {
        title: String,
        #[arg(long, default_value_t = 5)]
        max: usize,
    },
}

#[derive(Serialize)]
struct StatsOutput {
    #[serde(flatten)]
    stats: IndexStats,
    built_at: String,
}

#[derive(Serialize)]
struct Hit {
    title: String,
    overview: String,
    imdb_url: String,
}

impl From<&Recommendation> for Hit {
    fn from(r: &Recommendation) -> Self {
        Self { title: r.display_title().to_string(), overview: r.display_overview().to_string(), imdb_url: r.imdb_url() }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let config = EngineConfig {
        index: IndexConfig { max_features: Some(cli.max_features), ..IndexConfig::default() },
        ..EngineConfig::default()
    };
    let engine = RecommendationEngine::from_csv_path(&cli.catalog, config)?;
    let built_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();

    let json = match cli.command {
        Commands::Stats => serde_json::to_string_pretty(&StatsOutput { stats: engine.stats(), built_at })?,
        Commands::Title { title, top_n } => render_hits(&engine.recommend_by_title(&title, top_n))?,
        Commands::Storyline { text, top_n } => render_hits(&engine.recommend_by_storyline(&text, top_n))?,
        Commands::Suggest { title, max } => serde_json::to_string_pretty(&engine.suggest_titles(&title, max))?,
    };
    println!("{json}");
    Ok(())
}

fn render_hits(recs: &[Recommendation]) -> Result<String> {
    if recs.is_empty() {
        tracing::info!("no recommendations found");
    }
    let hits: Vec<Hit> = recs.iter().map(Hit::from).collect();
    Ok(serde_json::to_string_pretty(&hits)?)
}
