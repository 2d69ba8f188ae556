use sea_orm::{
    ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    sea_query::{Expr, Func, SimpleExpr},
};

use super::Store;
use crate::{
    entities::{film, review},
    error::{AppError, AppResult},
};

impl Store {
    pub async fn create_film(
        &self,
        name: &str,
        release_year: Option<i32>,
    ) -> AppResult<film::Model> {
        if self.film_by_name(name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "film with name {name} already exists"
            )));
        }

        let model = film::ActiveModel {
            id: Default::default(),
            name: Set(name.to_string()),
            release_year: Set(release_year),
        };

        match film::Entity::insert(model).exec_with_returning(&self.db).await {
            Ok(created) => Ok(created),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyExists(
                    format!("film with name {name} already exists"),
                )),
                _ => Err(err.into()),
            },
        }
    }

    pub async fn film_by_name(&self, name: &str) -> AppResult<Option<film::Model>> {
        let film = film::Entity::find()
            .filter(film::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(film)
    }

    /// Films in insertion order.
    pub async fn list_films(&self, skip: u64, limit: u64) -> AppResult<Vec<film::Model>> {
        let films = film::Entity::find()
            .order_by_asc(film::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(films)
    }

    /// Films whose name contains `substring`, case-sensitively, in
    /// insertion order. SQLite's LIKE is case-insensitive for ASCII, so
    /// this goes through INSTR instead.
    pub async fn films_by_substring(
        &self,
        substring: &str,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<film::Model>> {
        let films = film::Entity::find()
            .filter(Expr::cust_with_values(r#"INSTR("film"."name", ?) > 0"#, [substring]))
            .order_by_asc(film::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(films)
    }

    pub async fn films_by_year(
        &self,
        release_year: i32,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<film::Model>> {
        let films = film::Entity::find()
            .filter(film::Column::ReleaseYear.eq(release_year))
            .order_by_asc(film::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(films)
    }

    /// Films ranked by average mark, highest first. The inner join drops
    /// films with no reviews; ties are broken by film name ascending.
    pub async fn films_by_average_desc(
        &self,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<film::Model>> {
        let avg_mark =
            SimpleExpr::from(Func::avg(Expr::col((review::Entity, review::Column::Mark))));

        let films = film::Entity::find()
            .inner_join(review::Entity)
            .group_by(film::Column::Id)
            .order_by(avg_mark, Order::Desc)
            .order_by_asc(film::Column::Name)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(films)
    }
}
