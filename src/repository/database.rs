use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};

use crate::models::todo::{Todo, TodoChanges};
use crate::repository::schema::todos::dsl::*;
use crate::repository::{RepositoryError, TodoRepository};

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;
type DBConnection = PooledConnection<ConnectionManager<PgConnection>>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id VARCHAR(36) PRIMARY KEY,
    title VARCHAR(128) NOT NULL,
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ,
    finished_at TIMESTAMPTZ
);
CREATE INDEX IF NOT EXISTS todos_finished_at_idx ON todos (finished_at);
";

/// PostgreSQL-backed todo storage sharing one r2d2 pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    /// Builds the pool. Fails if no connection can be established.
    pub fn new(database_url: &str, max_size: u32) -> Result<Self, RepositoryError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = r2d2::Pool::builder().max_size(max_size).build(manager)?;
        Ok(Database { pool })
    }

    /// Creates the `todos` table and its index when missing. Safe to run on every start.
    pub fn init_schema(&self) -> Result<(), RepositoryError> {
        self.connection()?.batch_execute(SCHEMA)?;
        tracing::info!("database schema is up to date");
        Ok(())
    }

    fn connection(&self) -> Result<DBConnection, RepositoryError> {
        Ok(self.pool.get()?)
    }
}

impl TodoRepository for Database {
    fn list(&self) -> Result<Vec<Todo>, RepositoryError> {
        let rows = todos
            .order((created_at.asc(), id.asc()))
            .load::<Todo>(&mut self.connection()?)?;
        Ok(rows)
    }

    fn create(&self, todo: &Todo) -> Result<Todo, RepositoryError> {
        let stored = diesel::insert_into(todos)
            .values(todo)
            .get_result::<Todo>(&mut self.connection()?)?;
        Ok(stored)
    }

    fn get(&self, todo_id: &str) -> Result<Todo, RepositoryError> {
        if has_nul(todo_id) {
            return Err(RepositoryError::NotFound(todo_id.to_string()));
        }
        todos
            .find(todo_id)
            .first::<Todo>(&mut self.connection()?)
            .optional()?
            .ok_or_else(|| RepositoryError::NotFound(todo_id.to_string()))
    }

    fn update(&self, todo_id: &str, changes: &TodoChanges) -> Result<Todo, RepositoryError> {
        if has_nul(todo_id) {
            return Err(RepositoryError::NotFound(todo_id.to_string()));
        }
        diesel::update(todos.find(todo_id))
            .set(changes)
            .get_result::<Todo>(&mut self.connection()?)
            .optional()?
            .ok_or_else(|| RepositoryError::NotFound(todo_id.to_string()))
    }

    fn delete(&self, todo_id: &str) -> Result<(), RepositoryError> {
        if has_nul(todo_id) {
            return Err(RepositoryError::NotFound(todo_id.to_string()));
        }
        let count = diesel::delete(todos.find(todo_id)).execute(&mut self.connection()?)?;
        if count == 0 {
            return Err(RepositoryError::NotFound(todo_id.to_string()));
        }
        Ok(())
    }

    fn search(&self, query: &str) -> Result<Vec<Todo>, RepositoryError> {
        // Stored text never contains NUL, and PostgreSQL rejects it as a parameter.
        if has_nul(query) {
            return Ok(Vec::new());
        }
        let pattern = format!("%{}%", escape_like(query));
        let rows = todos
            .filter(title.like(&pattern).or(description.like(&pattern)))
            .order((created_at.asc(), id.asc()))
            .load::<Todo>(&mut self.connection()?)?;
        Ok(rows)
    }
}

fn has_nul(value: &str) -> bool {
    value.contains('\0')
}

/// Escapes LIKE wildcards so the query matches as a plain substring.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
