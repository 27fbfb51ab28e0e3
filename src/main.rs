mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod obfuscation;
mod openapi;
mod pagination;
mod repositories;
mod routes;
mod services;
mod utils;
mod validators;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use mongodb::bson::doc;
use mongodb::Client;

use crate::config::{StorageBackend, CONFIG};
use crate::middleware::AuthMiddleware;
use crate::obfuscation::IdCodec;
use crate::repositories::{InMemoryPayoutRepository, MongoPayoutRepository, PayoutRepository};
use crate::services::{seed_from_file, PayoutService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Build the id codec before accepting traffic
    let codec = IdCodec::new(&CONFIG.obfuscation_keys()).map_err(|err| {
        error!("Refusing to start: {}", err);
        io::Error::other(err)
    })?;

    let repository = connect_repository().await?;

    // Load seed payouts when configured
    if let Some(path) = &CONFIG.seed_payouts_path {
        seed_from_file(repository.as_ref(), path)
            .await
            .map_err(|err| {
                error!("Failed to seed payouts: {}", err);
                io::Error::other(err)
            })?;
    }

    // Initialize services
    let payout_service = web::Data::new(PayoutService::new(repository, Arc::new(codec)));

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(payout_service.clone())
            .configure(|cfg| routes::configure_routes(cfg, AuthMiddleware::new(&CONFIG.jwt_secret)))
    })
    .bind(&server_addr)?
    .run()
    .await
}

/// Open the configured payout store.
async fn connect_repository() -> io::Result<Arc<dyn PayoutRepository>> {
    match CONFIG.storage_backend {
        StorageBackend::Memory => {
            info!("Using in-memory payout storage");
            Ok(Arc::new(InMemoryPayoutRepository::new()))
        }
        StorageBackend::MongoDb => {
            // Connect to MongoDB
            info!("Connecting to MongoDB...");
            let client = Client::with_uri_str(&CONFIG.mongodb_uri)
                .await
                .map_err(|err| {
                    error!("Failed to connect to MongoDB: {}", err);
                    io::Error::other(err)
                })?;

            let db = client.database(&CONFIG.database_name);

            // Test MongoDB connection
            db.run_command(doc! { "ping": 1 }).await.map_err(|err| {
                error!("Failed to ping MongoDB: {}", err);
                io::Error::other(err)
            })?;
            info!("Connected to MongoDB successfully!");

            let repository = MongoPayoutRepository::new(&db);
            repository.create_indexes().await.map_err(|err| {
                error!("Failed to create indexes: {}", err);
                io::Error::other(err.to_string())
            })?;

            Ok(Arc::new(repository))
        }
    }
}
