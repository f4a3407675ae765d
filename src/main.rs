//! catalogd binary: wires configuration, the cache service, routes, and
//! middleware together and runs the server.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use catalogd::catalog::{CatalogService, SampleCatalog};
use catalogd::config::Config;
use catalogd::middleware::{RequestLogger, Stack};
use catalogd::security::CorsMiddleware;
use catalogd::server::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    info!(
        bind = %config.bind,
        ttl_secs = config.cache_ttl_secs,
        "starting catalogd"
    );

    let service = Arc::new(CatalogService::with_ttl(
        Arc::new(SampleCatalog::new()),
        config.cache_ttl(),
    ));

    let mut cors = CorsMiddleware::new();
    for origin in &config.allowed_origins {
        cors = cors.allow_origin(origin.as_str());
    }

    let stack = Arc::new(
        Stack::new(catalogd::api::router(service))
            .with(cors)
            .with(RequestLogger),
    );

    let server = Server::bind(&config.bind).await?;
    server
        .run(move |req| {
            let stack = Arc::clone(&stack);
            async move { stack.dispatch(req).await }
        })
        .await?;

    Ok(())
}
