use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ai/trial", post(handlers::trial))
        .route("/ai/generate-plan", post(handlers::generate_plan))
        .route("/ai/diet-suggestion", post(handlers::diet_suggestion))
        .route("/ai/plans", get(handlers::list_plans))
        .route("/ai/plans/:id", get(handlers::get_plan).delete(handlers::delete_plan))
}
