use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::competitor::CompetitorProfile};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitors/{name}",
    params(
        ("name" = String, Path, description = "Competitor name, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Career profile found", body = CompetitorProfile),
        (status = 404, description = "No results stored for this competitor")
    ),
    tag = "competitors"
)]
pub async fn get_competitor_profile(
    State(db): State<Database>,
    Path(name): Path<String>,
) -> Result<Response, WebError> {
    let profile = services::get_profile(db.pool(), &name).await?;

    Ok(Json(profile).into_response())
}
