use std::net::SocketAddr;

use api::config::{ServerConfig, APP_TITLE};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::from_env();
    info!(
        "upload limit {} MB; static bundle: {}",
        config.max_video_mb,
        config
            .static_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "<none>".to_string())
    );

    let bind = (config.host.clone(), config.port);
    let app = api::routes::router(config);

    let listener = match tokio::net::TcpListener::bind(bind.clone()).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {}:{}: {err}", bind.0, bind.1);
            return;
        }
    };
    let addr: Option<SocketAddr> = listener.local_addr().ok();
    match addr {
        Some(addr) => info!("{APP_TITLE} listening on http://{addr}"),
        None => info!("{APP_TITLE} listening on {}:{}", bind.0, bind.1),
    }

    if let Err(err) = axum::serve(listener, app).await {
        error!("server exited unexpectedly: {err}");
    }
}
