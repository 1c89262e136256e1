use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use swot_engine::config::Settings;
use swot_engine::core::SwotEngine;
use swot_engine::logging;
use swot_engine::routes::{self, AppState};
use swot_engine::services::ResultCache;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info", "compact");
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging, LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    logging::init(&log_level, &log_format);

    info!("Starting SWOT analysis service...");

    // Train the success predictor before accepting requests
    let params = settings.engine.training_params();
    info!(
        "Training success predictor ({} samples, {} trees)",
        params.samples, params.forest.n_trees
    );
    let engine = SwotEngine::new(&params).map_err(|e| {
        error!("Failed to train success predictor: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let cache = Arc::new(ResultCache::new(settings.cache.max_entries, settings.cache.ttl_secs));
    info!(
        "Result cache initialized ({} entries, TTL: {}s)",
        settings.cache.max_entries, settings.cache.ttl_secs
    );

    let app_state = AppState { engine, cache };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
