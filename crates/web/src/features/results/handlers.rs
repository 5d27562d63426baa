use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use importer::{ImportOutcome, ScrapeOutcome};
use serde::Deserialize;
use storage::Database;
use utoipa::ToSchema;

use crate::error::WebError;

use super::services;

/// Optional request body overriding the tournament's stored source ids.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SourceIdsOverride {
    pub source_ids: Option<Vec<String>>,
}

#[utoipa::path(
    post,
    path = "/api/tournaments/{slug}/results/preview",
    params(
        ("slug" = String, Path, description = "Tournament slug")
    ),
    request_body(content = SourceIdsOverride, description = "Optional source id override"),
    responses(
        (status = 200, description = "Parsed results and summary, nothing persisted", body = ScrapeOutcome),
        (status = 404, description = "Tournament not found")
    ),
    tag = "results"
)]
pub async fn preview_results(
    State(db): State<Database>,
    Path(slug): Path<String>,
    body: Option<Json<SourceIdsOverride>>,
) -> Result<Response, WebError> {
    let tournament = services::find_tournament(db.pool(), &slug).await?;
    let source_ids = resolve_source_ids(body, &tournament.source_ids);

    let outcome = services::preview(&source_ids).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    post,
    path = "/api/tournaments/{slug}/results/import",
    params(
        ("slug" = String, Path, description = "Tournament slug")
    ),
    request_body(content = SourceIdsOverride, description = "Optional source id override"),
    responses(
        (status = 200, description = "Results replaced atomically", body = ImportOutcome),
        (status = 404, description = "Tournament not found"),
        (status = 422, description = "Scrape produced zero rows; stored results left untouched")
    ),
    tag = "results"
)]
pub async fn import_results(
    State(db): State<Database>,
    Path(slug): Path<String>,
    body: Option<Json<SourceIdsOverride>>,
) -> Result<Response, WebError> {
    let tournament = services::find_tournament(db.pool(), &slug).await?;
    let source_ids = resolve_source_ids(body, &tournament.source_ids);

    let outcome = services::import(db.pool(), &tournament, &source_ids).await?;

    Ok(Json(outcome).into_response())
}

fn resolve_source_ids(body: Option<Json<SourceIdsOverride>>, stored: &[String]) -> Vec<String> {
    body.and_then(|Json(b)| b.source_ids)
        .unwrap_or_else(|| stored.to_vec())
}
