use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tournament {
    pub tournament_id: Uuid,
    pub name: String,
    pub slug: String,
    /// Star multiplier used by the points formula; NULL means unrated
    /// and is scored as 3 stars.
    pub prestige_rating: Option<i32>,
    pub event_date: Option<chrono::NaiveDate>,
    /// External page identifiers on the federation site, in fetch order.
    pub source_ids: Vec<String>,
    pub created_at: chrono::NaiveDateTime,
}
