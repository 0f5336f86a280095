use std::sync::Arc;

use cinematch_api::{
    catalog::CatalogLoader,
    config::Config,
    routes::{create_router, AppState},
    services::PosterResolver,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Loaded once; the catalog is never reloaded while the server runs
    let catalog = CatalogLoader::from_config(&config).load();
    let posters = PosterResolver::from_config(&config)?;
    let state = Arc::new(AppState::new(catalog, posters, config.trending_count));

    let mut app = create_router(state);
    if config.cors_allow_any {
        app = app.layer(CorsLayer::permissive());
    }

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
