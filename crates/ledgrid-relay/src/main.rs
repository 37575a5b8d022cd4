//! ledgrid-relay - forward LED grid commands to the device over HTTP

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ledgrid_core::DEFAULT_GRID_SIZE;
use ledgrid_device::HttpGateway;
use ledgrid_relay::{router, DEFAULT_PORT};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// HTTP relay for the LED grid device
#[derive(Parser, Debug)]
#[command(name = "ledgrid-relay")]
#[command(about = "Forward LED grid commands to the device", long_about = None)]
#[command(version)]
struct Args {
    /// Base URL of the device
    #[arg(long, default_value = "http://192.168.4.1")]
    device_url: String,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    bind: std::net::IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Per-request timeout towards the device, in milliseconds
    #[arg(long, default_value_t = 3000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LEDGRID_LOG")
                .unwrap_or_else(|_| EnvFilter::new("ledgrid_relay=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let gateway = HttpGateway::new(
        &args.device_url,
        Duration::from_millis(args.timeout_ms),
        DEFAULT_GRID_SIZE,
    )?;
    info!("Forwarding to {}", gateway.base_url());

    let app = router(Arc::new(gateway));
    let addr = SocketAddr::new(args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Relay listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
