//! Output frame relaying.
//!
//! An output frame is read chunk by chunk into a fixed buffer. Every chunk,
//! even an empty one, is forwarded to the sink as soon as it is read. A
//! chunk that fills the buffer means the frame continues; the first chunk
//! that ends on a terminator or end-of-stream ends the frame.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use super::wire_format::{read_terminated, Boundary, CHUNK_BUFFER_SIZE, CHUNK_CAPACITY};
use crate::error::{AmError, Result};

/// Totals for one relayed output frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Bytes forwarded to the sink.
    pub bytes: usize,
    /// Primitive invocations, including the final one.
    pub chunks: usize,
}

/// Relay one output frame from `reader` to `sink`.
///
/// The sink is flushed once the frame is complete.
pub async fn relay_output<R, W>(reader: &mut R, sink: &mut W) -> Result<FrameStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = BytesMut::with_capacity(CHUNK_BUFFER_SIZE);
    let mut stats = FrameStats::default();

    loop {
        chunk.clear();
        let boundary = read_terminated(reader, &mut chunk, CHUNK_CAPACITY).await?;

        sink.write_all(&chunk).await.map_err(AmError::Output)?;
        stats.bytes += chunk.len();
        stats.chunks += 1;
        tracing::trace!(len = chunk.len(), ?boundary, "chunk forwarded");

        if boundary == Boundary::Terminated {
            break;
        }
    }

    sink.flush().await.map_err(AmError::Output)?;
    Ok(stats)
}
