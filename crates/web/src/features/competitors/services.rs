use sqlx::PgPool;
use storage::{dto::competitor::CompetitorProfile, error::Result, services::competitor};

/// Career profile for one competitor, NotFound when nothing matches
pub async fn get_profile(pool: &PgPool, name: &str) -> Result<CompetitorProfile> {
    competitor::get_profile(pool, name).await
}
