use std::sync::Arc;

use anyhow::Context;

use bizauth_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bizauth_observability::init();

    let config = ApiConfig::from_env();
    let services = Arc::new(app::AppServices::in_memory());

    if let Some(seed) = &config.superuser {
        services
            .bootstrap_superuser(seed)
            .context("failed to create the configured superuser")?;
    }

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
