use serde::{Deserialize, Serialize};

use crate::entities::{film, review, user};

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub login: String,
}

impl From<user::Model> for UserOut {
    fn from(model: user::Model) -> Self {
        Self { login: model.login }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewFilm {
    pub name: String,
    #[serde(default)]
    pub release_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct FilmOut {
    pub name: String,
    pub release_year: Option<i32>,
}

impl From<film::Model> for FilmOut {
    fn from(model: film::Model) -> Self {
        Self { name: model.name, release_year: model.release_year }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewReview {
    pub film_name: String,
    #[serde(default)]
    pub text: Option<String>,
    pub mark: i32,
}

#[derive(Debug, Serialize)]
pub struct ReviewOut {
    pub login: String,
    pub film_name: String,
    pub text: Option<String>,
    pub mark: i32,
}

impl From<review::Model> for ReviewOut {
    fn from(model: review::Model) -> Self {
        Self {
            login: model.login,
            film_name: model.film_name,
            text: model.text,
            mark: model.mark,
        }
    }
}

/// Aggregated statistics for one film plus a page of its reviews.
///
/// `average_mark` is `None` iff the film has no reviews, and
/// `number_of_reviews` only counts reviews that carry text, so it is
/// always `<= number_of_marks`.
#[derive(Debug, Serialize)]
pub struct FilmExtended {
    pub name: String,
    pub release_year: Option<i32>,
    pub average_mark: Option<f64>,
    pub number_of_marks: u64,
    pub number_of_reviews: u64,
    pub reviews: Vec<ReviewOut>,
}

fn default_limit() -> u64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}
