use notescan::common::init_logger_exe;
use notescan::server::{app, AppState};
use notescan::vision::VisionConfig;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger_exe();

    log::info!("Starting OCR gateway...");

    let config = VisionConfig::from_env();
    if config.api_key.is_none() {
        log::warn!("YANDEX_CLOUD_API_KEY is not set, recognition requests will fail");
    }

    let state = AppState::new(config)?;
    let router = app(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = SocketAddr::from(([0, 0, 0, 0], port.parse::<u16>()?));

    log::info!("Attempting to bind to port {}", port);

    let listener = TcpListener::bind(addr).await?;
    log::info!("Successfully bound to http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
