//! Transport module - Unix Domain Socket connection to the API app.
//!
//! Provides a connected stream whose write direction can be closed on its
//! own, which is how the request boundary is signalled to the peer.

mod socket;

pub use socket::{sun_path_capacity, validate_socket_path, SocketReader, SocketStream, SocketWriter};
