// Shape of Us server: accepts one profile per connection and answers with its metrics.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use shape_server::{config, logging, Server};

#[derive(Debug, Parser)]
#[command(name = "shape-server", version, about = "Health metrics server")]
struct Args {
    /// Config file (default: ~/.config/shape/server.toml, then /etc/shape/server.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen address, overrides config and SHAPE_LISTEN_ADDR.
    #[arg(long)]
    addr: Option<SocketAddr>,
    /// Maximum concurrent connections.
    #[arg(long)]
    max_connections: Option<usize>,
    /// Read/write deadline in seconds; 0 disables it.
    #[arg(long)]
    io_timeout_secs: Option<u64>,
    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut cfg = config::load(args.config.as_deref())?;
    if let Some(addr) = args.addr {
        cfg.listen_addr = addr;
    }
    if let Some(n) = args.max_connections {
        cfg.max_connections = n;
    }
    if let Some(t) = args.io_timeout_secs {
        cfg.io_timeout_secs = t;
    }
    info!(?cfg, "starting shape-server {}", env!("CARGO_PKG_VERSION"));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let server = Server::bind(&cfg)
            .await
            .with_context(|| format!("cannot listen on {}", cfg.listen_addr))?;
        server.run_until(shutdown_signal()).await?;
        Ok::<(), anyhow::Error>(())
    })
}

/// Wait for Ctrl+C or SIGTERM (Unix). Falls back to Ctrl+C only if the SIGTERM handler fails.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
            return;
        }
    }
    let _ = tokio::signal::ctrl_c().await;
}
