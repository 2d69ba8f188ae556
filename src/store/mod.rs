mod films;
mod reviews;
mod stats;
mod users;

use sea_orm::DatabaseConnection;

pub use users::hash_password;

/// Data access layer over the catalog database. Cheap to clone; every
/// method checks a connection out of the pool for its own duration.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
