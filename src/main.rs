use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use puppy_picker::config::{LogFormat, Settings};
use puppy_picker::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use puppy_picker::{Catalog, Matcher};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format: LogFormat = match std::env::var("LOG_FORMAT") {
        Ok(value) => value.parse().map_err(|e| {
            eprintln!("Configuration error: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
        })?,
        Err(_) => settings.logging.format,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    match log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting Puppy Picker...");

    // The matching feature cannot start on a broken catalog
    let catalog = match Catalog::from_path(&settings.catalog.path) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            error!("Failed to load breed catalog from {}: {}", settings.catalog.path, e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };

    if catalog.is_empty() {
        error!("Breed catalog at {} has no breeds", settings.catalog.path);
    }

    // Settings::load has already rejected a zero limit
    let matcher = Matcher::new(settings.matching.limit);

    info!(
        "Catalog ready with {} breeds, shortlist length {}",
        catalog.len(),
        matcher.limit()
    );

    let app_state = AppState { catalog, matcher };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
