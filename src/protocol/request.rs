//! Request encoding.
//!
//! The request has no length prefix and no terminator: the body is written
//! as-is and the write direction is then shut down. The peer sees the end of
//! the request as a zero-length read.

use bytes::{Buf, Bytes};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{AmError, Result};

/// Write `body` completely, then half-close `writer`.
///
/// A single write may accept fewer bytes than offered; the cursor advances
/// by exactly the accepted count until the body is drained.
///
/// # Errors
///
/// Returns [`AmError::Write`] on any write or shutdown failure, including a
/// write that accepts zero bytes.
pub async fn send_request<W>(writer: &mut W, mut body: Bytes) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let len = body.len();

    while body.has_remaining() {
        let written = writer.write(body.chunk()).await.map_err(AmError::Write)?;
        if written == 0 {
            return Err(AmError::Write(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "write returned 0",
            )));
        }
        body.advance(written);
    }

    writer.shutdown().await.map_err(AmError::Write)?;
    tracing::debug!(len, "request sent, write side closed");
    Ok(())
}
