use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/auth/profile", get(handlers::get_profile).put(handlers::update_profile))
        .route("/auth/change-password", put(handlers::change_password))
        .route("/auth/account", delete(handlers::delete_account))
}
