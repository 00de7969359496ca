//! Zone01 gateway.
//!
//! ```text
//!   Browser                         GATEWAY                          Zone01
//!   ───────                         ───────                          ──────
//!   POST /auth/signin  ──▶  cors → validate → Basic auth  ──▶  POST {base}{signin_path}
//!   {identity,password} ◀── {token}  ◀── token normalizer ◀──  JWT (JSON or text)
//!
//!   POST /graphql      ──▶  cors → bearer check            ──▶  POST {base}{graphql_path}
//!   Authorization      ◀── status + body, byte for byte    ◀──  GraphQL response
//!
//!   POST /auth/refresh ──▶  {"status":"ok"}   (no upstream call)
//!   GET  /healthz      ──▶  {"status":"ok"}
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use zone01_gateway::config::{load_config, GatewayConfig, ObservabilityConfig};
use zone01_gateway::lifecycle::signals::wait_for_signal;
use zone01_gateway::observability::{logging, metrics};
use zone01_gateway::{GatewayServer, Shutdown};

#[derive(Parser)]
#[command(name = "zone01-gateway", version)]
#[command(about = "CORS-friendly gateway in front of the Zone01 platform API", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // No usable config, so log with the default level and format.
            logging::init(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    logging::init(&config.observability);

    if let Err(e) = serve(config).await {
        tracing::error!(error = %e, "Gateway failed");
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn serve(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        signin_timeout_secs = config.timeouts.signin_secs,
        graphql_timeout_secs = config.timeouts.graphql_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
