use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::rankings::handlers::get_rankings,
        features::competitors::handlers::get_competitor_profile,
        features::results::handlers::preview_results,
        features::results::handlers::import_results,
    ),
    components(
        schemas(
            storage::dto::ranking::RankingResponse,
            storage::dto::ranking::RankingEntry,
            storage::dto::ranking::RankingMeta,
            storage::dto::ranking::FiltersApplied,
            storage::dto::ranking::RankingType,
            storage::dto::competitor::CompetitorProfile,
            storage::dto::competitor::CompetitorResult,
            storage::models::Tournament,
            storage::models::TournamentResult,
            importer::parse::ParsedResult,
            importer::ScrapeOutcome,
            importer::ImportOutcome,
            importer::ScrapeSummary,
            features::results::handlers::SourceIdsOverride,
        )
    ),
    tags(
        (name = "rankings", description = "Points-based leaderboards"),
        (name = "competitors", description = "Competitor career profiles"),
        (name = "results", description = "Tournament result scraping and import"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting OpenMat results API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/rankings", features::rankings::routes::routes())
        .nest("/api/competitors", features::competitors::routes::routes())
        .nest("/api/tournaments", features::results::routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(db);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
