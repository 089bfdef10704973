mod config;
mod db;
mod encoder;
mod generation;
mod handlers;
mod models;
mod routes;
mod state;
mod storage;
mod structs;
mod validation;

use crate::config::AppConfig;
use crate::generation::GenerationEngine;
use crate::state::app_state::AppState;
use crate::state::environment::Environment;
use crate::storage::StorageFactory;
use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use routes::init_routes;

/// Logos arrive inline as data URIs, so bodies can be larger than the default.
const JSON_LIMIT_BYTES: usize = 4 * 1024 * 1024;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env()?;

    // Capabilities are resolved once and injected from here on
    let environment = Environment::from_config(&config);
    let storage = StorageFactory::create(&config, &environment).await;
    let engine = GenerationEngine::with_default_strategies(environment);
    for strategy in engine.strategies() {
        info!("Strategy '{}' (priority {})", strategy.name, strategy.priority);
    }

    // Create shared state
    let app_state = web::Data::new(AppState { engine, storage });
    let origins = config.cors_origins.clone();

    info!("Listening on {}:{}", config.bind_address, config.port);
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = origins.iter().fold(
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allowed_headers(vec![http::header::ACCEPT])
                .allowed_header(http::header::CONTENT_TYPE)
                .max_age(3600),
            |cors, origin| cors.allowed_origin(origin),
        );
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT_BYTES))
            .configure(init_routes)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
