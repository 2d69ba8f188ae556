use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    AppState,
    auth::CurrentUser,
    error::AppResult,
    models::{FilmExtended, FilmOut, NewFilm, NewReview, NewUser, PageQuery, ReviewOut, UserOut},
};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewUser>,
) -> AppResult<Json<UserOut>> {
    let user = state.store.register(&req.login, &req.password).await?;
    Ok(Json(user.into()))
}

pub async fn list_users(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<UserOut>>> {
    let users = state.store.list_users(page.skip, page.limit).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn create_review(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewReview>,
) -> AppResult<Json<ReviewOut>> {
    let review = state.store.create_review(&user.0, &req.film_name, req.mark, req.text).await?;
    tracing::info!(login = %review.login, film = %review.film_name, mark = review.mark, "review created");
    Ok(Json(review.into()))
}

pub async fn read_own_review(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(film_name): Path<String>,
) -> AppResult<Json<Option<ReviewOut>>> {
    let review = state.store.user_review(&user.0, &film_name).await?;
    Ok(Json(review.map(Into::into)))
}

pub async fn list_own_reviews(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<ReviewOut>>> {
    let reviews = state.store.reviews_by_user(&user.0, page.skip, page.limit).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

pub async fn create_film(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewFilm>,
) -> AppResult<Json<FilmOut>> {
    let film = state.store.create_film(&req.name, req.release_year).await?;
    Ok(Json(film.into()))
}

pub async fn list_films(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<FilmOut>>> {
    let films = state.store.list_films(page.skip, page.limit).await?;
    Ok(Json(films.into_iter().map(Into::into).collect()))
}

pub async fn films_by_substring(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(substring): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<FilmOut>>> {
    let films = state.store.films_by_substring(&substring, page.skip, page.limit).await?;
    Ok(Json(films.into_iter().map(Into::into).collect()))
}

pub async fn films_by_year(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(release_year): Path<i32>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<FilmOut>>> {
    let films = state.store.films_by_year(release_year, page.skip, page.limit).await?;
    Ok(Json(films.into_iter().map(Into::into).collect()))
}

pub async fn films_by_average(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<FilmOut>>> {
    let films = state.store.films_by_average_desc(page.skip, page.limit).await?;
    Ok(Json(films.into_iter().map(Into::into).collect()))
}

pub async fn film_reviews(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(film_name): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<ReviewOut>>> {
    let reviews = state.store.reviews_by_film(&film_name, page.skip, page.limit).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

pub async fn film_extended(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(film_name): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<FilmExtended>> {
    let info = state.store.extended_info(&film_name, page.skip, page.limit).await?;
    Ok(Json(info))
}
