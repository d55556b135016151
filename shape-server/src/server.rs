//! TCP server: accept loop, one spawned task per connection, one request and one response each.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use shape_core::wire::{read_frame, within, write_frame, FrameDecodeError, FrameEncodeError};
use shape_core::{compute, ComputationError, HealthReport, Profile};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Pause after a failed accept (e.g. out of file descriptors) before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Connection lifecycle. Every connection walks these in order; failures jump to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Accepted,
    Reading,
    Computing,
    Responding,
    Closed,
}

/// Why a connection ended without a (complete) response.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("bad request: {0}")]
    Read(#[from] FrameDecodeError),
    #[error("computation failed: {0}")]
    Computation(#[from] ComputationError),
    #[error("response not sent: {0}")]
    Write(#[from] FrameEncodeError),
    #[error("timed out")]
    Timeout,
}

/// Bound listener plus the limits applied to each connection.
pub struct Server {
    listener: TcpListener,
    limit: Arc<Semaphore>,
    io_timeout: Option<Duration>,
}

impl Server {
    pub async fn bind(config: &Config) -> io::Result<Self> {
        let listener = TcpListener::bind(config.listen_addr).await?;
        Ok(Self {
            listener,
            // Zero would never admit a connection.
            limit: Arc::new(Semaphore::new(config.max_connections.max(1))),
            io_timeout: config.io_timeout(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` resolves. In-flight connections finish on their own.
    pub async fn run_until<F: Future<Output = ()>>(self, shutdown: F) -> io::Result<()> {
        tokio::select! {
            res = self.run() => res,
            _ = shutdown => {
                info!("shutting down");
                Ok(())
            }
        }
    }

    /// Accept forever. Waits for a free slot before each accept.
    pub async fn run(self) -> io::Result<()> {
        info!(addr = %self.local_addr()?, "server listening");
        loop {
            let permit = match self.limit.clone().acquire_owned().await {
                Ok(p) => p,
                Err(_) => return Ok(()),
            };
            let (stream, peer) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("accept failed: {e}");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };
            let io_timeout = self.io_timeout;
            tokio::spawn(async move {
                let _permit = permit;
                info!(%peer, "connected");
                match handle_connection(stream, io_timeout).await {
                    Ok(report) => info!(%peer, status = %report.imc_status, "connection closed"),
                    Err(e) => warn!(%peer, "connection closed without response: {e}"),
                }
            });
        }
    }
}

fn enter(state: ConnectionState) {
    debug!(?state, "connection state");
}

/// Run one connection to completion: read one profile, compute, write one report, close.
/// Decode, computation and timeout failures close the stream without writing anything.
pub async fn handle_connection<S>(
    mut stream: S,
    io_timeout: Option<Duration>,
) -> Result<HealthReport, ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    enter(ConnectionState::Accepted);

    enter(ConnectionState::Reading);
    let profile: Profile = within(io_timeout, read_frame(&mut stream))
        .await
        .map_err(|_| ConnectionError::Timeout)??;
    debug!(?profile, "request decoded");

    enter(ConnectionState::Computing);
    let report = compute(&profile)?;

    enter(ConnectionState::Responding);
    let written = match within(io_timeout, write_frame(&mut stream, &report)).await {
        Ok(res) => res.map_err(ConnectionError::from),
        Err(_) => Err(ConnectionError::Timeout),
    };
    let _ = stream.shutdown().await;
    enter(ConnectionState::Closed);
    written.map(|()| report)
}
