use erc721_gateway::cli::Cli;
use erc721_gateway::erc721::{Dispatcher, MethodRegistry};
use erc721_gateway::output;
use erc721_gateway::rpc::{self, GatewayRpc};
use erc721_gateway::upstream::JsonRpcUpstream;

use clap::Parser;
use eyre::WrapErr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Main entry point for the gateway
#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Parse CLI arguments; missing required configuration exits here
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let config = Arc::new(cli.to_config().wrap_err("invalid configuration")?);
    output::print_banner(&config);
    output::print_config(&config);

    let upstream = JsonRpcUpstream::new(config.upstream_endpoint.clone(), config.upstream_timeout)
        .wrap_err("failed to create upstream client")?;
    let registry = Arc::new(MethodRegistry::new());
    tracing::info!(methods = registry.len(), "selector registry ready");

    let dispatcher = Dispatcher::new(config.clone(), registry, Arc::new(upstream));
    let (local_addr, handle) =
        rpc::start_server(cli.listen_addr, GatewayRpc::new(dispatcher), cli.rpc_max_connections)
            .await
            .wrap_err_with(|| format!("failed to bind {}", cli.listen_addr))?;
    output::print_running(local_addr);

    tokio::select! {
        reason = shutdown_signal() => {
            output::print_shutdown(reason);
            tracing::info!(reason, "shutting down");
            // Already stopped only if the server exited on its own.
            let _ = handle.stop();
            handle.clone().stopped().await;
        }
        _ = handle.clone().stopped() => {
            output::print_shutdown("server stopped");
        }
    }

    Ok(())
}

/// Initialize tracing: `RUST_LOG` filter (default `info`), optionally as JSON lines.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "received Ctrl+C",
        _ = terminate => "received SIGTERM",
    }
}
