use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr};

use super::Store;
use crate::{
    entities::review,
    error::{AppError, AppResult},
};

impl Store {
    pub async fn create_review(
        &self,
        login: &str,
        film_name: &str,
        mark: i32,
        text: Option<String>,
    ) -> AppResult<review::Model> {
        if !(0..=10).contains(&mark) {
            return Err(AppError::InvalidMark(mark));
        }

        if self.film_by_name(film_name).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "film with name {film_name} does not exist"
            )));
        }

        if self.find_review(login, film_name).await?.is_some() {
            return Err(AppError::AlreadyReviewed(format!(
                "film {film_name} has already been reviewed by user {login}"
            )));
        }

        let model = review::ActiveModel {
            id: Default::default(),
            login: Set(login.to_string()),
            film_name: Set(film_name.to_string()),
            text: Set(text),
            mark: Set(mark),
        };

        // Pre-checks are a fast path only; the unique index and the film
        // foreign key settle concurrent races.
        match review::Entity::insert(model).exec_with_returning(&self.db).await {
            Ok(created) => Ok(created),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyReviewed(
                    format!("film {film_name} has already been reviewed by user {login}"),
                )),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(AppError::NotFound(
                    format!("film with name {film_name} does not exist"),
                )),
                _ => Err(err.into()),
            },
        }
    }

    /// One user's review of one film. Fails if the film itself is absent;
    /// a missing review for an existing film is `Ok(None)`.
    pub async fn user_review(
        &self,
        login: &str,
        film_name: &str,
    ) -> AppResult<Option<review::Model>> {
        if self.film_by_name(film_name).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "film with name {film_name} does not exist"
            )));
        }
        self.find_review(login, film_name).await
    }

    pub async fn reviews_by_user(
        &self,
        login: &str,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<review::Model>> {
        let reviews = review::Entity::find()
            .filter(review::Column::Login.eq(login))
            .order_by_asc(review::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(reviews)
    }

    /// Reviews for a film in insertion order. An unknown film yields an
    /// empty page rather than an error.
    pub async fn reviews_by_film(
        &self,
        film_name: &str,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<review::Model>> {
        let reviews = review::Entity::find()
            .filter(review::Column::FilmName.eq(film_name))
            .order_by_asc(review::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(reviews)
    }

    async fn find_review(&self, login: &str, film_name: &str) -> AppResult<Option<review::Model>> {
        let review = review::Entity::find()
            .filter(review::Column::Login.eq(login))
            .filter(review::Column::FilmName.eq(film_name))
            .one(&self.db)
            .await?;
        Ok(review)
    }
}
