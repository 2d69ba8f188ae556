use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr};
use sha2::{Digest, Sha256};

use super::Store;
use crate::{
    entities::user,
    error::{AppError, AppResult},
};

/// One-way digest of a plaintext password, hex-encoded. Only the digest
/// is ever persisted or compared.
pub fn hash_password(plaintext: &str) -> String {
    format!("{:x}", Sha256::digest(plaintext.as_bytes()))
}

impl Store {
    pub async fn register(&self, login: &str, password: &str) -> AppResult<user::Model> {
        if user::Entity::find_by_id(login).one(&self.db).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "user with login {login} already exists"
            )));
        }

        let model = user::ActiveModel {
            login: Set(login.to_string()),
            hashed_password: Set(hash_password(password)),
        };

        // The existence check above is only a fast path; the primary key
        // is the authority if a concurrent register wins the race.
        match user::Entity::insert(model).exec_with_returning(&self.db).await {
            Ok(created) => Ok(created),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyExists(
                    format!("user with login {login} already exists"),
                )),
                _ => Err(err.into()),
            },
        }
    }

    /// Credential check. `None` means "no matching user"; the caller
    /// decides whether that is an authentication failure.
    pub async fn verify(&self, login: &str, password: &str) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Login.eq(login))
            .filter(user::Column::HashedPassword.eq(hash_password(password)))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// Users ordered by login ascending.
    pub async fn list_users(&self, skip: u64, limit: u64) -> AppResult<Vec<user::Model>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Login)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(users)
    }
}
