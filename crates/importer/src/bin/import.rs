use clap::{Parser, Subcommand};
use importer::seed::parse_seed;
use importer::{FederationClient, ScrapeOrchestrator};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use storage::models::Tournament;
use storage::repository::result::ResultRepository;
use storage::repository::tournament::TournamentRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openmat-import")]
#[command(about = "Federation results scraper and importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and parse a tournament's source pages without writing anything
    Preview {
        #[arg(short, long)]
        slug: String,

        /// Override the tournament's stored source ids
        #[arg(long, value_delimiter = ',')]
        source_ids: Option<Vec<String>>,
    },
    /// Fetch, parse, and atomically replace the tournament's stored results
    Import {
        #[arg(short, long)]
        slug: String,

        #[arg(long, value_delimiter = ',')]
        source_ids: Option<Vec<String>>,
    },
    /// Import results from an offline seed file
    Seed { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;

    match cli.command {
        Commands::Preview { slug, source_ids } => {
            let tournament = find_tournament(&pool, &slug).await?;
            let ids = source_ids.unwrap_or_else(|| tournament.source_ids.clone());

            let orchestrator = ScrapeOrchestrator::new(FederationClient::from_env()?);
            let outcome = orchestrator.preview(&ids).await;

            tracing::info!("Parsed {} rows from {} source id(s)", outcome.summary.total, ids.len());
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Import { slug, source_ids } => {
            let tournament = find_tournament(&pool, &slug).await?;
            let ids = source_ids.unwrap_or_else(|| tournament.source_ids.clone());

            let orchestrator = ScrapeOrchestrator::new(FederationClient::from_env()?);
            let outcome = orchestrator
                .import(&pool, tournament.tournament_id, &ids)
                .await?;

            tracing::info!("Imported {} rows for '{}'", outcome.imported, slug);
            println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
        }
        Commands::Seed { file } => {
            tracing::info!("Loading seed file: {}", file.display());
            let text = tokio::fs::read_to_string(&file).await?;
            let seed = parse_seed(&text)?;

            let tournament = find_tournament(&pool, &seed.slug).await?;

            let rows: Vec<_> = seed
                .results
                .into_iter()
                .map(importer::parse::ParsedResult::into_new_result)
                .collect();

            let imported = ResultRepository::new(&pool)
                .replace_for_tournament(tournament.tournament_id, &rows)
                .await?;

            tracing::info!("Imported {} rows for '{}' from seed", imported, seed.slug);
        }
    }

    Ok(())
}

async fn find_tournament(
    pool: &sqlx::PgPool,
    slug: &str,
) -> Result<Tournament, Box<dyn std::error::Error>> {
    let tournament = TournamentRepository::new(pool)
        .find_by_slug(slug)
        .await
        .map_err(|e| format!("tournament '{}': {}", slug, e))?;
    Ok(tournament)
}
