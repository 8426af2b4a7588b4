mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use crate::{
    config::Config,
    database::Database,
    services::{PgUserStore, UserStore},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ {}", e);
        std::io::Error::other(e)
    })?;

    log::info!("🚀 Starting User Service...");
    log::info!("📊 Database: {}", database::redact_url(&config.database_url));

    let db = Database::new(&config.database_url).await.map_err(|e| {
        log::error!("❌ Failed to connect to database: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    log::info!("✅ Database connected successfully");

    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db.pool().clone()));
    let store_data: web::Data<dyn UserStore> = web::Data::from(store);

    let (host, port) = config.bind_address();
    let allowed_origin = config.allowed_origin;
    log::info!("🌐 Server starting on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::cors_policy(allowed_origin))
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
