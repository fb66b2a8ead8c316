use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::api::error::ApiError;
use crate::models::todo::TodoPayload;
use crate::service::todo::TodoService;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[get("/todo")]
pub async fn get_todos(service: web::Data<TodoService>) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || service.list()).await??;
    Ok(HttpResponse::Ok().json(todos))
}

#[post("/todo")]
pub async fn create_todo(
    service: web::Data<TodoService>,
    new_todo: web::Json<TodoPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = new_todo.into_inner();
    payload.validate()?;
    let todo = web::block(move || service.create(payload)).await??;
    tracing::info!(todo_id = %todo.id, "todo created");
    Ok(HttpResponse::Created().json(todo))
}

#[get("/todo/search")]
pub async fn search_todos(
    service: web::Data<TodoService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let SearchQuery { q } = query.into_inner();
    let todos = web::block(move || service.search(&q)).await??;
    Ok(HttpResponse::Ok().json(todos))
}

#[get("/todo/{id}")]
pub async fn get_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = id.into_inner();
    let todo = web::block(move || service.get(&todo_id)).await??;
    Ok(HttpResponse::Ok().json(todo))
}

#[put("/todo/{id}")]
pub async fn update_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<String>,
    updated_todo: web::Json<TodoPayload>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = id.into_inner();
    let payload = updated_todo.into_inner();
    payload.validate()?;
    let todo = web::block(move || service.update(&todo_id, payload)).await??;
    tracing::info!(todo_id = %todo.id, "todo updated");
    Ok(HttpResponse::Ok().json(todo))
}

#[put("/todo/{id}/finish")]
pub async fn finish_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = id.into_inner();
    let todo = web::block(move || service.finish(&todo_id)).await??;
    tracing::info!(todo_id = %todo.id, "todo finished");
    Ok(HttpResponse::Ok().json(todo))
}

#[delete("/todo/{id}")]
pub async fn delete_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todo_id = id.into_inner();
    let deleted_id = todo_id.clone();
    web::block(move || service.delete(&todo_id)).await??;
    tracing::info!(todo_id = %deleted_id, "todo deleted");
    Ok(HttpResponse::NoContent().finish())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

/// Registers the todo routes. `/todo/search` goes before `/todo/{id}` so it is not read as an id.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(get_todos)
        .service(create_todo)
        .service(search_todos)
        .service(get_todo_by_id)
        .service(update_todo_by_id)
        .service(finish_todo_by_id)
        .service(delete_todo_by_id);
}
