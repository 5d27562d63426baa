use axum::{Router, routing::post};
use storage::Database;

use super::handlers::{import_results, preview_results};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:slug/results/preview", post(preview_results))
        .route("/:slug/results/import", post(import_results))
}
