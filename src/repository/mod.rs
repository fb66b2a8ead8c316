use thiserror::Error;

use crate::models::todo::{Todo, TodoChanges};

pub mod database;
#[cfg(test)]
pub mod memory;
pub mod schema;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("todo {0} not found")]
    NotFound(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Storage of todo records keyed by id.
///
/// Every method touches at most one row, except `list` and `search` which only read.
/// Lookups that match no row report [`RepositoryError::NotFound`].
pub trait TodoRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Todo>, RepositoryError>;

    /// Inserts `todo` and returns it as stored.
    fn create(&self, todo: &Todo) -> Result<Todo, RepositoryError>;

    fn get(&self, todo_id: &str) -> Result<Todo, RepositoryError>;

    /// Writes the fields set in `changes` to the row and returns the stored result.
    fn update(&self, todo_id: &str, changes: &TodoChanges) -> Result<Todo, RepositoryError>;

    fn delete(&self, todo_id: &str) -> Result<(), RepositoryError>;

    /// Todos whose title or description contains `query`. An empty query matches everything.
    fn search(&self, query: &str) -> Result<Vec<Todo>, RepositoryError>;
}
