mod config;
mod error;
mod form;
mod routes;


use clap::Parser;
use config::{AppConfig, Cli};
use routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production passes flags or real env vars.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notekeeper_api=info".parse().expect("valid directive")),
        )
        .init();

    let config = AppConfig::from_cli(Cli::parse())?;
    tracing::info!("Starting notekeeper-api with config: {:?}", config);

    let state = AppState::from_config(&config)?;
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("notekeeper-api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
