//! Error types for neoterm-am-socket.
//!
//! Every variant is fatal. The `Display` text is the diagnostic printed on
//! stderr before the process exits with [`AmError::exit_code`].

use std::io;

use thiserror::Error;

/// Main error type for all client operations.
#[derive(Debug, Error)]
pub enum AmError {
    /// More than one positional argument was given.
    #[error("neoterm-am-socket only expects 1 argument and received {received}")]
    Usage { received: usize },

    /// The endpoint path does not fit in `sockaddr_un::sun_path`.
    #[error("Socket path \"{path}\" too long")]
    SocketPathTooLong { path: String },

    /// The socket could not be created or connected.
    #[error("Could not connect to socket: {0}")]
    Connect(#[source] io::Error),

    /// Sending the request or half-closing the write side failed.
    #[error("Socket write error: {0}")]
    Write(#[source] io::Error),

    /// A single-byte read from the peer failed (not end-of-stream).
    #[error("Socket read error: {0}")]
    Read(#[source] io::Error),

    /// Status frame filled its buffer without a terminator.
    #[error("Exit code \"{literal}\" is too long. It must be valid number between 0-255")]
    StatusTooLong { literal: String },

    /// Status frame is empty, has a non-digit, or is an ambiguous zero.
    #[error("Exit code \"{literal}\" is not a valid number between 0-255")]
    InvalidStatus { literal: String },

    /// Status frame is numeric but above 255.
    #[error("Exit code \"{literal}\" is not a valid exit code between 0-255")]
    StatusOutOfRange { literal: String },

    /// Forwarding output to the local stdout/stderr failed.
    #[error("Output write error: {0}")]
    Output(#[source] io::Error),
}

impl AmError {
    /// Process exit status for this failure.
    ///
    /// All failures collapse to 1 so they stay distinguishable only through
    /// the diagnostic, never through the status.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// True for errors raised while the connection was open.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            AmError::StatusTooLong { .. }
                | AmError::InvalidStatus { .. }
                | AmError::StatusOutOfRange { .. }
        )
    }
}

/// Result type alias using AmError.
pub type Result<T> = std::result::Result<T, AmError>;
