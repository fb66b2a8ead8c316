use std::sync::Arc;

use chrono::Utc;

use crate::models::todo::{Todo, TodoChanges, TodoPayload};
use crate::repository::{RepositoryError, TodoRepository};

/// Assigns ids and timestamps, then hands the work to the repository.
///
/// Callers are expected to validate payloads before passing them in.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<Todo>, RepositoryError> {
        self.repository.list()
    }

    pub fn create(&self, payload: TodoPayload) -> Result<Todo, RepositoryError> {
        let todo = Todo {
            id: uuid::Uuid::new_v4().to_string(),
            title: payload.title,
            description: payload.description,
            created_at: Utc::now(),
            updated_at: None,
            finished_at: None,
        };
        self.repository.create(&todo)
    }

    pub fn get(&self, todo_id: &str) -> Result<Todo, RepositoryError> {
        self.repository.get(todo_id)
    }

    /// Replaces title and description and stamps `updated_at`.
    pub fn update(&self, todo_id: &str, payload: TodoPayload) -> Result<Todo, RepositoryError> {
        let changes = TodoChanges {
            title: Some(payload.title),
            description: Some(payload.description),
            updated_at: Some(Utc::now()),
            finished_at: None,
        };
        self.repository.update(todo_id, &changes)
    }

    /// Stamps `finished_at`. A finished todo can be finished again; the later time wins.
    pub fn finish(&self, todo_id: &str) -> Result<Todo, RepositoryError> {
        let todo = self.repository.get(todo_id)?;
        let changes = TodoChanges {
            finished_at: Some(Utc::now()),
            ..Default::default()
        };
        self.repository.update(&todo.id, &changes)
    }

    pub fn delete(&self, todo_id: &str) -> Result<(), RepositoryError> {
        self.repository.delete(todo_id)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Todo>, RepositoryError> {
        self.repository.search(query)
    }
}
