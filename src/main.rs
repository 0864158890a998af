//! School administration server. Reads settings from the environment (and `.env`).

use school_admin::{app, from_env, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("school_admin=info,tower_http=info")),
        )
        .init();

    let settings = from_env()?;
    tracing::info!(storage = ?settings.storage, schema = %settings.schema, "starting");
    let state = AppState::from_settings(&settings).await?;
    let router = app(state, &settings);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
