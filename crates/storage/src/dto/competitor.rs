use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One stored result for a competitor, joined with tournament metadata.
#[derive(Debug, Clone, FromRow)]
pub struct CompetitorResultRow {
    pub tournament_id: Uuid,
    pub tournament_name: String,
    pub event_date: Option<NaiveDate>,
    pub division: String,
    pub placement: i16,
    pub competitor_name: String,
    pub academy: Option<String>,
    pub country_code: Option<String>,
    pub prestige_rating: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompetitorResult {
    pub tournament_id: Uuid,
    pub tournament_name: String,
    pub event_date: Option<NaiveDate>,
    pub division: String,
    pub placement: i16,
    pub points: i64,
}

/// Career summary for one competitor across every stored tournament.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompetitorProfile {
    pub competitor_name: String,
    pub total_points: i64,
    pub gold_count: u32,
    pub silver_count: u32,
    pub bronze_count: u32,
    pub tournaments_count: usize,
    /// Most common academy across matched rows; ties keep the first seen.
    pub academy: Option<String>,
    pub country_code: Option<String>,
    pub results: Vec<CompetitorResult>,
}
