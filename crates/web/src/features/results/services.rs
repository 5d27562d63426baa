use importer::{FederationClient, ImportOutcome, ScrapeOrchestrator, ScrapeOutcome};
use sqlx::PgPool;
use storage::models::Tournament;
use storage::repository::tournament::TournamentRepository;

use crate::error::{WebError, WebResult};

pub async fn find_tournament(pool: &PgPool, slug: &str) -> WebResult<Tournament> {
    let tournament = TournamentRepository::new(pool).find_by_slug(slug).await?;
    Ok(tournament)
}

pub async fn preview(source_ids: &[String]) -> WebResult<ScrapeOutcome> {
    Ok(orchestrator()?.preview(source_ids).await)
}

pub async fn import(
    pool: &PgPool,
    tournament: &Tournament,
    source_ids: &[String],
) -> WebResult<ImportOutcome> {
    let outcome = orchestrator()?
        .import(pool, tournament.tournament_id, source_ids)
        .await?;
    Ok(outcome)
}

fn orchestrator() -> WebResult<ScrapeOrchestrator> {
    let client = FederationClient::from_env()
        .map_err(|e| WebError::InternalServerError(format!("cannot build HTTP client: {}", e)))?;
    Ok(ScrapeOrchestrator::new(client))
}
