//! Framing: length-prefix (4 bytes LE) + JSON payload. One frame per direction per connection.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::error::Elapsed;

const LEN_SIZE: usize = 4;
/// Upper bound on a payload. Requests and responses are a few hundred bytes.
pub const MAX_FRAME_LEN: u32 = 64 * 1024;

/// Serialize a message into a bare JSON object (no length prefix). Floats decode back bit-exact.
pub fn encode_payload<T: Serialize>(msg: &T) -> Result<Vec<u8>, FrameEncodeError> {
    Ok(serde_json::to_vec(msg)?)
}

/// Parse a bare JSON object. Missing or unknown keys are errors, never defaults.
pub fn decode_payload<T: DeserializeOwned>(payload: &[u8]) -> Result<T, FrameDecodeError> {
    Ok(serde_json::from_slice(payload)?)
}

/// Encode a message into a single frame: 4 bytes LE length + JSON payload.
pub fn encode_frame<T: Serialize>(msg: &T) -> Result<Vec<u8>, FrameEncodeError> {
    let payload = encode_payload(msg)?;
    let len = payload.len() as u32;
    if payload.len() > MAX_FRAME_LEN as usize {
        return Err(FrameEncodeError::TooLarge);
    }
    let mut out = Vec::with_capacity(LEN_SIZE + payload.len());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Error encoding or sending a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameEncodeError {
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("frame too large")]
    TooLarge,
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode one frame from the front of `bytes`. Returns the message and the number of bytes consumed.
/// Returns `NeedMore` on a partial buffer.
pub fn decode_frame<T: DeserializeOwned>(bytes: &[u8]) -> Result<(T, usize), FrameDecodeError> {
    if bytes.len() < LEN_SIZE {
        return Err(FrameDecodeError::NeedMore);
    }
    let len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    if len > MAX_FRAME_LEN as usize {
        return Err(FrameDecodeError::TooLarge);
    }
    if bytes.len() < LEN_SIZE + len {
        return Err(FrameDecodeError::NeedMore);
    }
    let msg = decode_payload(&bytes[LEN_SIZE..LEN_SIZE + len])?;
    Ok((msg, LEN_SIZE + len))
}

/// Error receiving or decoding a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameDecodeError {
    #[error("need more bytes")]
    NeedMore,
    #[error("frame too large")]
    TooLarge,
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Read exactly one frame from `reader` and decode it.
pub async fn read_frame<T, R>(reader: &mut R) -> Result<T, FrameDecodeError>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; LEN_SIZE];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_le_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(FrameDecodeError::TooLarge);
    }
    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;
    decode_payload(&payload)
}

/// Encode `msg` and write it as one frame, then flush.
pub async fn write_frame<T, W>(writer: &mut W, msg: &T) -> Result<(), FrameEncodeError>
where
    T: Serialize,
    W: AsyncWrite + Unpin,
{
    let frame = encode_frame(msg)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Run `fut` under an optional deadline. `None` waits forever.
pub async fn within<F: Future>(limit: Option<Duration>, fut: F) -> Result<F::Output, Elapsed> {
    match limit {
        Some(d) => tokio::time::timeout(d, fut).await,
        None => Ok(fut.await),
    }
}
