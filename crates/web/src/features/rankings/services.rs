use sqlx::PgPool;
use storage::{
    dto::ranking::{RankingEntry, RankingFilter},
    error::Result,
    services::ranking,
};

/// Compute the requested leaderboard over stored results
pub async fn get_rankings(pool: &PgPool, filter: &RankingFilter) -> Result<Vec<RankingEntry>> {
    ranking::get_rankings(pool, filter).await
}
