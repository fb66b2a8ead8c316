use std::sync::Arc;

use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::config::Config;
use crate::repository::database::Database;
use crate::service::todo::TodoService;

mod api;
mod config;
mod models;
mod repository;
mod service;
mod telemetry;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(Response {
        message: "Welcome to the Todo App API!".to_string(),
    })
}

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().json(Response {
        message: "pong".to_string(),
    })
}

async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::UnknownRoute)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_subscriber(env!("CARGO_PKG_NAME"))?;

    tracing::info!("initializing database");
    let database = Database::new(&config.database_url, config.pool_size)?;
    database.init_schema()?;
    let app_data = web::Data::new(TodoService::new(Arc::new(database)));

    tracing::info!(host = %config.host, port = config.port, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .service(index)
            .service(ping)
            .configure(api::api::config)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorResponse;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_index() {
        let app = test::init_service(App::new().service(index)).await;
        let req = TestRequest::default().to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::OK, resp.status());
        let body: Response = test::read_body_json(resp).await;
        assert_eq!(body.message, "Welcome to the Todo App API!");
    }

    #[actix_web::test]
    async fn test_ping() {
        let app = test::init_service(App::new().service(ping)).await;
        let req = TestRequest::default().uri("/ping").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::OK, resp.status());
        let body: Response = test::read_body_json(resp).await;
        assert_eq!(body.message, "pong");
    }

    #[actix_web::test]
    async fn test_unknown_route() {
        let app = test::init_service(
            App::new()
                .service(index)
                .default_service(web::route().to(not_found)),
        )
        .await;
        let req = TestRequest::default().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status());
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Resource not found");
    }
}
