//! Repository module
//!
//! CRUD operations against the embedded SurrealDB instance. Each entity gets
//! its own repository built on [`BaseRepository`]; ids are handled in the
//! `"table:id"` string convention at the API edge.

pub mod chat;
pub mod order;
pub mod product;
pub mod verification;

pub use chat::ChatRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use verification::VerificationRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(resource) => AppError::not_found(resource),
            RepoError::Validation(message) => AppError::validation(message),
            RepoError::Database(message) => AppError::database(message),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a record id from a table name and a key that may or may not carry
/// the `"table:"` prefix already
pub fn make_thing(table: &str, id: &str) -> Thing {
    let key = strip_table_prefix(table, id);
    Thing::from((table.to_string(), key.to_string()))
}

/// Strip the `"table:"` prefix from an id if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
