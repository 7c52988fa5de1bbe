//! Client and exchange driver.
//!
//! One invocation is a single forward pass over one connection:
//! 1. Connect to the socket
//! 2. Send the request body and half-close
//! 3. Read the status frame
//! 4. Relay the stdout frame, then the stderr frame
//! 5. Close the connection and hand the status back to the caller
//!
//! Nothing here exits the process; the caller turns [`Outcome::status`] or
//! the error into an exit status.
//!
//! # Example
//!
//! ```ignore
//! use neoterm_am_socket::{Client, Request, SocketConfig};
//!
//! let client = Client::new(SocketConfig::from_env());
//! let outcome = client
//!     .execute(Request::new("battery-status"), &mut tokio::io::stdout(), &mut tokio::io::stderr())
//!     .await?;
//! std::process::exit(outcome.status.into());
//! ```

use tokio::io::{AsyncRead, AsyncWrite, BufReader};

use crate::config::{Request, SocketConfig};
use crate::error::Result;
use crate::protocol::{read_status, relay_output, send_request, FrameStats, CHUNK_BUFFER_SIZE};
use crate::transport::SocketStream;

/// Result of a well-formed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Status decoded from the status frame.
    pub status: u8,
    /// Totals for the stdout frame.
    pub stdout: FrameStats,
    /// Totals for the stderr frame.
    pub stderr: FrameStats,
}

/// Client bound to one socket endpoint.
#[derive(Debug, Clone, Default)]
pub struct Client {
    config: SocketConfig,
}

impl Client {
    /// Create a client for the given endpoint.
    pub fn new(config: SocketConfig) -> Self {
        Self { config }
    }

    /// Get the endpoint configuration.
    pub fn config(&self) -> &SocketConfig {
        &self.config
    }

    /// Connect, run one exchange, and close the connection.
    ///
    /// The connection is dropped before this returns, on success and on
    /// every error path.
    pub async fn execute<O, E>(
        &self,
        request: Request,
        stdout: &mut O,
        stderr: &mut E,
    ) -> Result<Outcome>
    where
        O: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        let stream = SocketStream::connect(self.config.path()).await?;
        let (reader, mut writer) = stream.into_split();

        let outcome = exchange(reader, &mut writer, request, stdout, stderr).await;
        drop(writer);
        outcome
    }
}

/// Run the request/response exchange over an already connected stream.
///
/// `writer` is shut down after the request body; `reader` must then yield
/// the status, stdout and stderr frames in that order.
pub async fn exchange<R, W, O, E>(
    reader: R,
    writer: &mut W,
    request: Request,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<Outcome>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    send_request(writer, request.into_body()).await?;

    let mut reader = BufReader::with_capacity(CHUNK_BUFFER_SIZE, reader);

    let status = read_status(&mut reader).await?;
    let stdout = relay_output(&mut reader, stdout).await?;
    tracing::debug!(bytes = stdout.bytes, chunks = stdout.chunks, "stdout frame complete");
    let stderr = relay_output(&mut reader, stderr).await?;
    tracing::debug!(bytes = stderr.bytes, chunks = stderr.chunks, "stderr frame complete");

    Ok(Outcome {
        status,
        stdout,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmError;
    use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};

    /// Peer that reads the whole request, then writes `response` and closes.
    async fn peer(server: DuplexStream, response: Vec<u8>) -> Vec<u8> {
        let (mut read, mut write) = tokio::io::split(server);
        let mut request = Vec::new();
        read.read_to_end(&mut request).await.unwrap();
        write.write_all(&response).await.unwrap();
        write.shutdown().await.unwrap();
        request
    }

    async fn run(
        request: Request,
        response: &[u8],
    ) -> (Result<Outcome>, Vec<u8>, Vec<u8>, Vec<u8>) {
        let (client, server) = duplex(64 * 1024);
        let (client_read, mut client_write) = tokio::io::split(client);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let (outcome, received) = tokio::join!(
            exchange(client_read, &mut client_write, request, &mut stdout, &mut stderr),
            peer(server, response.to_vec()),
        );
        (outcome, received, stdout, stderr)
    }

    #[tokio::test]
    async fn test_empty_response_exits_zero() {
        let (outcome, request, stdout, stderr) = run(Request::default(), b"0\0\0\0").await;

        let outcome = outcome.unwrap();
        assert_eq!(outcome.status, 0);
        assert!(request.is_empty());
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn test_status_and_stdout_are_reproduced() {
        let (outcome, request, stdout, stderr) =
            run(Request::new("say hello"), b"42\0hello\0\0").await;

        assert_eq!(outcome.unwrap().status, 42);
        assert_eq!(request, b"say hello");
        assert_eq!(stdout, b"hello");
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn test_frames_go_to_their_own_sinks() {
        let (outcome, _, stdout, stderr) = run(Request::default(), b"1\0out\0err\0").await;

        let outcome = outcome.unwrap();
        assert_eq!(outcome.status, 1);
        assert_eq!(stdout, b"out");
        assert_eq!(stderr, b"err");
        assert_eq!(outcome.stderr.bytes, 3);
    }

    #[tokio::test]
    async fn test_peer_closing_early_yields_empty_frames() {
        let (outcome, _, stdout, stderr) = run(Request::default(), b"7").await;

        assert_eq!(outcome.unwrap().status, 7);
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_status_stops_before_output() {
        let (outcome, _, stdout, _) = run(Request::default(), b"999\0hello\0\0").await;

        let err = outcome.unwrap_err();
        assert!(matches!(err, AmError::StatusOutOfRange { .. }));
        assert!(err.to_string().contains("999"));
        assert!(stdout.is_empty());
    }

    #[tokio::test]
    async fn test_multi_chunk_stdout_is_reassembled() {
        let payload: Vec<u8> = (0..5000).map(|i| b'A' + (i % 26) as u8).collect();
        let mut response = b"0\0".to_vec();
        response.extend_from_slice(&payload);
        response.extend_from_slice(b"\0\0");

        let (outcome, _, stdout, stderr) = run(Request::default(), &response).await;

        let outcome = outcome.unwrap();
        assert_eq!(stdout, payload);
        assert!(stderr.is_empty());
        assert_eq!(outcome.stdout.chunks, 2);
    }

    #[test]
    fn test_client_keeps_config() {
        let client = Client::new(SocketConfig::new("/tmp/x.sock"));
        assert_eq!(client.config().path(), std::path::Path::new("/tmp/x.sock"));
    }
}
