//! One client session: connect, read a profile, send it, receive the report. Strictly sequential.

use std::io::{BufRead, Write};
use std::time::Duration;

use shape_core::wire::{read_frame, within, write_frame, FrameDecodeError, FrameEncodeError};
use shape_core::{HealthReport, Profile};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::config::Config;
use crate::input::{self, InputError};

/// Every variant ends the session; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("request not sent: {0}")]
    Send(#[from] FrameEncodeError),
    #[error("no valid response: {0}")]
    Receive(#[from] FrameDecodeError),
    #[error("server did not answer in time")]
    Timeout,
}

/// An open connection that can carry exactly one request.
pub struct Session {
    stream: TcpStream,
    io_timeout: Option<Duration>,
}

impl Session {
    pub async fn connect(addr: &str, io_timeout: Option<Duration>) -> Result<Self, SessionError> {
        let stream = within(io_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| SessionError::Timeout)?
            .map_err(|source| SessionError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        info!(%addr, "connected");
        Ok(Self { stream, io_timeout })
    }

    /// Send the profile and wait for its report. Consumes the session; the connection closes after.
    pub async fn exchange(mut self, profile: &Profile) -> Result<HealthReport, SessionError> {
        within(self.io_timeout, write_frame(&mut self.stream, profile))
            .await
            .map_err(|_| SessionError::Timeout)??;
        debug!(?profile, "request sent");
        let report: HealthReport = within(self.io_timeout, read_frame(&mut self.stream))
            .await
            .map_err(|_| SessionError::Timeout)??;
        let _ = self.stream.shutdown().await;
        debug!(?report, "response received");
        Ok(report)
    }
}

/// Full client flow against the configured server. Terminal I/O is passed in so it can be scripted.
pub async fn run<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<HealthReport, SessionError> {
    let session = Session::connect(&config.server_addr, config.io_timeout()).await?;
    let profile = input::read_profile(input, out)?;
    session.exchange(&profile).await
}
