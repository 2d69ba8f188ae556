pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::store::Store;

pub struct AppState {
    pub store: Store,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(routes::create_user).get(routes::list_users))
        .route("/users/me/reviews", post(routes::create_review).get(routes::list_own_reviews))
        .route("/users/me/reviews/{film_name}", get(routes::read_own_review))
        .route("/films", post(routes::create_film).get(routes::list_films))
        .route("/films/filter/substring/{substring}", get(routes::films_by_substring))
        .route("/films/filter/release_year/{release_year}", get(routes::films_by_year))
        .route("/films/filter/average", get(routes::films_by_average))
        .route("/films/{film_name}/reviews", get(routes::film_reviews))
        .route("/films/{film_name}/extended", get(routes::film_extended))
        .with_state(state)
}
