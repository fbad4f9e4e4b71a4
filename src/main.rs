use crate::config::config::Config;
use crate::models::response::ApiResponse;
use crate::repository::database::Database;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use log::info;
use serde_json::Value;

mod config;
mod controller;
mod models;
mod repository;
mod service;

#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({
        "durum": "calisiyor"
    })))
}

async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(ApiResponse::<Value>::fail("kaynak bulunamadı")))
}

pub struct AppState {
    db: Database,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("./log-config.yml", Default::default()).expect("Log config file not found.");
    let config = Config::init();
    let db = Database::new(&config);
    let app_data = web::Data::new(AppState { db });

    info!(
        "istatistik servisi {}:{} adresinde başlatılıyor",
        config.server_host, config.server_port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(controller::handler::config)
            .service(health_check)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
