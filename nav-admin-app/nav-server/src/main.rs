use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use nav_api::{build_router, AppState};
use nav_infrastructure::{
    create_pool, run_migrations, MemoryContent, MemoryStore, PgContentRepository,
    PgMenuItemRepository, PgMenuRepository,
};
use nav_shared::config::AppConfig;
use nav_shared::constants::ADMIN_ACTOR_HEADER;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env before reading the layered configuration
    let config = AppConfig::load()?;

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = nav_shared::telemetry::init_telemetry(&config.app.name, config.app.log_dir.as_deref())?;

    info!("{} starting ({})", config.app.name, config.app.env);

    let state = if config.database.url.trim().is_empty() {
        warn!("No database configured; using the in-process store");
        let store = MemoryStore::new();
        let content = Arc::new(MemoryContent::new(config.navigation.site_base_url.clone()));
        AppState::new(
            Arc::new(store.menus()),
            Arc::new(store.items()),
            content.clone(),
            content,
            &config.navigation,
        )
    } else {
        info!("Connecting to database...");
        let pool = create_pool(&config.database).await?;
        info!("Database connection established.");

        if config.database.run_migrations {
            run_migrations(&pool).await?;
        }

        let content = Arc::new(PgContentRepository::new(pool.clone(), config.navigation.site_base_url.clone()));
        AppState::new(
            Arc::new(PgMenuRepository::new(pool.clone())),
            Arc::new(PgMenuItemRepository::new(pool)),
            content.clone(),
            content,
            &config.navigation,
        )
    };

    if !state.menus.ready().await {
        warn!("Navigation tables are missing; menu endpoints answer 503 until provisioned");
    }

    let app = build_router(state).layer(cors_layer(&config.app.cors_origins));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static(ADMIN_ACTOR_HEADER),
        ])
}
