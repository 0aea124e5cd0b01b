// src/main.rs
use anyhow::Result;
use hyper::Client;
use hyper_tls::HttpsConnector;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use gas_gateway::{
    config,
    gateway::Gateway,
    server::{RequestHandler, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gas_gateway=info".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path).await?;

    // One shared, pooled client for every forwarded call. The HTTPS
    // connector also handles plain HTTP upstreams.
    let client = Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(8)
        .build(HttpsConnector::new());

    let gateway = Arc::new(Gateway::new(
        client,
        config.upstream.base_url.clone(),
        config.upstream.api_key.clone(),
        config.upstream.timeout(),
    ));

    let handler = RequestHandler::new(gateway);

    let addr = config.server.listen_addr;
    info!("Starting gateway on {}, upstream {}", addr, config.upstream.base_url);

    tokio::select! {
        res = ServerBuilder::new(addr).with_handler(handler).serve() => {
            res?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
