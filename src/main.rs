use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use coach_engine::config::Settings;
use coach_engine::core::TemplateMatcher;
use coach_engine::routes::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &Settings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings);

    info!("Starting Coach Engine recommendation service...");

    let matcher = TemplateMatcher::new(settings.scoring.weights, settings.nutrition);

    info!("Matcher initialized with weights: {:?}", matcher.weights());

    let app_state = AppState {
        matcher,
        extraction: settings.extraction.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let json_limit = settings.server.json_limit_bytes;

    info!("Starting HTTP server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes_with_limit(json_limit))
    })
    .workers(workers)
    .bind((host, port))
    .map_err(|e| {
        tracing::error!("Failed to bind HTTP server: {}", e);
        e
    })?;

    server.run().await
}
