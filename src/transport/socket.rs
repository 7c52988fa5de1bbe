//! Unix Domain Socket connection.
//!
//! # Example
//!
//! ```ignore
//! use neoterm_am_socket::transport::SocketStream;
//!
//! let stream = SocketStream::connect("/tmp/am.sock").await?;
//! let (reader, writer) = stream.into_split();
//! ```

use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;

use crate::error::{AmError, Result};

/// Read half of a connected socket.
pub type SocketReader = OwnedReadHalf;

/// Write half of a connected socket. Shutting it down half-closes the
/// connection; the read half stays usable.
pub type SocketWriter = OwnedWriteHalf;

/// Size of `sockaddr_un::sun_path` on this platform.
pub fn sun_path_capacity() -> usize {
    // SAFETY: sockaddr_un is plain old data and all-zero is a valid value.
    let addr: libc::sockaddr_un = unsafe { std::mem::zeroed() };
    addr.sun_path.len()
}

/// Check that `path` fits in `sun_path` with room for the NUL terminator.
pub fn validate_socket_path(path: &Path) -> Result<()> {
    if path.as_os_str().as_bytes().len() >= sun_path_capacity() {
        return Err(AmError::SocketPathTooLong {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Connected Unix Domain Socket stream.
#[derive(Debug)]
pub struct SocketStream {
    stream: UnixStream,
}

impl SocketStream {
    /// Connect to the socket at `path`.
    ///
    /// The path length is checked first; an oversized path never reaches
    /// `connect`. No retry is attempted.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        validate_socket_path(path)?;

        let stream = UnixStream::connect(path).await.map_err(AmError::Connect)?;
        tracing::debug!(path = %path.display(), "connected");

        Ok(Self { stream })
    }

    /// Split into read and write halves.
    ///
    /// Both halves must be dropped to close the socket.
    pub fn into_split(self) -> (SocketReader, SocketWriter) {
        self.stream.into_split()
    }
}
