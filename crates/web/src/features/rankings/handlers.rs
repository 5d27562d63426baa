use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::ranking::{FiltersApplied, RankingFilter, RankingMeta, RankingResponse},
    services::scoring,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings",
    params(RankingFilter),
    responses(
        (status = 200, description = "Leaderboard computed successfully", body = RankingResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "rankings"
)]
pub async fn get_rankings(
    State(db): State<Database>,
    Query(filter): Query<RankingFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let rankings = services::get_rankings(db.pool(), &filter).await?;

    let meta = RankingMeta {
        ranking_type: filter.ranking_type.as_str().to_string(),
        formula_description: scoring::formula_description(),
        filters_applied: FiltersApplied {
            belt: filter.belt,
            gi_nogi: filter.gi_nogi,
            gender: filter.gender,
            tournament_id: filter.tournament_id,
            limit: filter.limit,
        },
        total: rankings.len(),
    };

    Ok(Json(RankingResponse { rankings, meta }).into_response())
}
