use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Tournament;

const TOURNAMENT_COLUMNS: &str =
    "tournament_id, name, slug, prestige_rating, event_date, source_ids, created_at";

/// Repository for Tournament lookups. Tournaments themselves are managed
/// elsewhere; the import and ranking paths only ever read them.
pub struct TournamentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TournamentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(&format!(
            "SELECT {} FROM tournaments WHERE tournament_id = $1",
            TOURNAMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(tournament)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(&format!(
            "SELECT {} FROM tournaments WHERE slug = $1",
            TOURNAMENT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(tournament)
    }

    pub async fn list(&self) -> Result<Vec<Tournament>> {
        let tournaments = sqlx::query_as::<_, Tournament>(&format!(
            "SELECT {} FROM tournaments ORDER BY event_date DESC NULLS LAST, created_at DESC",
            TOURNAMENT_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(tournaments)
    }
}
