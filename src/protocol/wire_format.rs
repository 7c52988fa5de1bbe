//! Wire format constants and the terminated-read primitive.
//!
//! The response is three frames on one stream:
//! ```text
//! ┌──────────────────┬──────────────────────────┬──────────────────────────┐
//! │ Status           │ Stdout                   │ Stderr                   │
//! │ ≤9 ASCII digits  │ chunks of ≤4095 bytes    │ chunks of ≤4095 bytes    │
//! │ NUL or EOF       │ last chunk: NUL or EOF   │ last chunk: NUL or EOF   │
//! └──────────────────┴──────────────────────────┴──────────────────────────┘
//! ```
//!
//! A chunk that fills its buffer without a terminator is continued by the
//! next chunk of the same frame.

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{AmError, Result};

/// Byte that ends a status frame or an output chunk.
pub const TERMINATOR: u8 = b'\0';

/// Storage for the status frame (one slot kept for the NUL pad).
pub const STATUS_BUFFER_SIZE: usize = 10;

/// Maximum encoded status length.
pub const STATUS_CAPACITY: usize = STATUS_BUFFER_SIZE - 1;

/// Storage for one output chunk (one slot kept for the NUL pad).
pub const CHUNK_BUFFER_SIZE: usize = 4096;

/// Maximum payload bytes in one output chunk.
pub const CHUNK_CAPACITY: usize = CHUNK_BUFFER_SIZE - 1;

/// How a single [`read_terminated`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A terminator byte or end-of-stream was seen.
    Terminated,
    /// `capacity` bytes were stored and no terminator was seen.
    BufferFull,
}

impl Boundary {
    /// True when the frame (or chunk) boundary was reached.
    #[inline]
    pub fn is_terminated(self) -> bool {
        self == Boundary::Terminated
    }
}

/// Read one byte at a time into `buf` until a terminator, end-of-stream, or
/// `capacity` stored bytes.
///
/// The terminator is consumed but not stored. Bytes are appended to `buf`,
/// which the caller clears between calls.
///
/// # Errors
///
/// Returns [`AmError::Read`] if a read fails for any reason other than
/// end-of-stream.
pub async fn read_terminated<R>(
    reader: &mut R,
    buf: &mut BytesMut,
    capacity: usize,
) -> Result<Boundary>
where
    R: AsyncRead + Unpin,
{
    let mut byte = [0u8; 1];
    let mut stored = 0;

    while stored < capacity {
        let n = reader.read(&mut byte).await.map_err(AmError::Read)?;
        if n == 0 || byte[0] == TERMINATOR {
            return Ok(Boundary::Terminated);
        }
        buf.put_u8(byte[0]);
        stored += 1;
    }

    Ok(Boundary::BufferFull)
}
