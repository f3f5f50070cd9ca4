mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod store;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_level =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,film_catalog_service=debug".into());

    // Configure and initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(true)
        .init();

    tracing::info!(
        "Logging initialized at level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let app = routes::create_router();

    tracing::info!("Film catalog service listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
