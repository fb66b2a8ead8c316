use std::sync::{Arc, Mutex};

use crate::models::todo::{Todo, TodoChanges};
use crate::repository::{RepositoryError, TodoRepository};

/// Vec-backed store used by the service and handler tests.
#[derive(Default, Clone)]
pub struct InMemoryRepository {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.todos.lock().unwrap().len()
    }
}

impl TodoRepository for InMemoryRepository {
    fn list(&self) -> Result<Vec<Todo>, RepositoryError> {
        Ok(self.todos.lock().unwrap().clone())
    }

    fn create(&self, todo: &Todo) -> Result<Todo, RepositoryError> {
        self.todos.lock().unwrap().push(todo.clone());
        Ok(todo.clone())
    }

    fn get(&self, todo_id: &str) -> Result<Todo, RepositoryError> {
        let todos = self.todos.lock().unwrap();
        todos
            .iter()
            .find(|todo| todo.id == todo_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(todo_id.to_string()))
    }

    fn update(&self, todo_id: &str, changes: &TodoChanges) -> Result<Todo, RepositoryError> {
        let mut todos = self.todos.lock().unwrap();
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or_else(|| RepositoryError::NotFound(todo_id.to_string()))?;
        if let Some(title) = &changes.title {
            todo.title = title.clone();
        }
        if let Some(description) = &changes.description {
            todo.description = description.clone();
        }
        if changes.updated_at.is_some() {
            todo.updated_at = changes.updated_at;
        }
        if changes.finished_at.is_some() {
            todo.finished_at = changes.finished_at;
        }
        Ok(todo.clone())
    }

    fn delete(&self, todo_id: &str) -> Result<(), RepositoryError> {
        let mut todos = self.todos.lock().unwrap();
        let index = todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or_else(|| RepositoryError::NotFound(todo_id.to_string()))?;
        todos.remove(index);
        Ok(())
    }

    fn search(&self, query: &str) -> Result<Vec<Todo>, RepositoryError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .filter(|todo| todo.title.contains(query) || todo.description.contains(query))
            .cloned()
            .collect())
    }
}
