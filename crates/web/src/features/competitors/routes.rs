use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_competitor_profile;

pub fn routes() -> Router<Database> {
    Router::new().route("/:name", get(get_competitor_profile))
}
