use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use kitchen_discovery::config::Settings;
use kitchen_discovery::models::KitchenAttributes;
use kitchen_discovery::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use kitchen_discovery::services::{
    CachedCandidateSource, CandidateSource, ProfileStore, SupabaseClient, SupabaseTables,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Initialize logging (LOG_LEVEL / LOG_FORMAT override the config file)
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting kitchen discovery service...");

    let supabase = Arc::new(SupabaseClient::new(
        settings.supabase.url,
        settings.supabase.api_key,
        SupabaseTables {
            chef_profiles: settings.supabase.chef_profiles_table,
            profiles: settings.supabase.profiles_table,
        },
        settings.supabase.storage_bucket,
    ));

    info!("Supabase client initialized");

    let source: Arc<dyn CandidateSource<KitchenAttributes>> = supabase.clone();
    let candidates = Arc::new(CachedCandidateSource::new(
        source,
        settings.cache.max_entries,
        settings.cache.ttl_secs,
    ));

    info!(
        "Candidate cache initialized ({} entries, TTL: {}s)",
        settings.cache.max_entries, settings.cache.ttl_secs
    );

    let profiles: Arc<dyn ProfileStore> = supabase;

    info!(
        "Discovery defaults: radius {}, sort {:?}",
        settings.discovery.default_filter().label(),
        settings.discovery.default_sort
    );

    // Build application state
    let app_state = AppState {
        candidates,
        profiles,
        discovery: settings.discovery,
    };

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
