use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::Store;
use crate::{
    entities::review,
    error::{AppError, AppResult},
    models::FilmExtended,
};

impl Store {
    /// Aggregated statistics for one film, plus the `skip..skip+limit`
    /// window of its reviews in insertion order.
    ///
    /// All counts and the average are computed over the film's full
    /// review list; the window only bounds the `reviews` payload.
    pub async fn extended_info(
        &self,
        film_name: &str,
        skip: u64,
        limit: u64,
    ) -> AppResult<FilmExtended> {
        let Some(film) = self.film_by_name(film_name).await? else {
            return Err(AppError::NotFound(format!(
                "film with name {film_name} does not exist"
            )));
        };

        let reviews = review::Entity::find()
            .filter(review::Column::FilmName.eq(film_name))
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await?;

        let number_of_marks = reviews.len() as u64;
        let number_of_reviews = reviews.iter().filter(|r| r.text.is_some()).count() as u64;

        let average_mark = if reviews.is_empty() {
            None
        } else {
            let sum: i64 = reviews.iter().map(|r| i64::from(r.mark)).sum();
            Some(round2(sum as f64 / reviews.len() as f64))
        };

        let page = reviews
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .map(Into::into)
            .collect();

        Ok(FilmExtended {
            name: film.name,
            release_year: film.release_year,
            average_mark,
            number_of_marks,
            number_of_reviews,
            reviews: page,
        })
    }
}

/// Round to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn round2_truncates_to_two_decimals() {
        assert_eq!(round2(8.0), 8.0);
        assert_eq!(round2(22.0 / 3.0), 7.33);
        assert_eq!(round2(23.0 / 3.0), 7.67);
        assert_eq!(round2(1.005), 1.0); // 1.005_f64 is really 1.00499…
    }
}
