//! Protocol module - request encoding and response frame decoding.
//!
//! This module implements both directions of the exchange:
//! - Request body written verbatim, ended by a write half-close
//! - Status frame (bounded, strictly validated)
//! - Stdout and stderr frames (unbounded, relayed chunk by chunk)

mod output;
mod request;
mod status;
mod wire_format;

pub use output::{relay_output, FrameStats};
pub use request::send_request;
pub use status::{parse_status, read_status};
pub use wire_format::{
    read_terminated, Boundary, CHUNK_BUFFER_SIZE, CHUNK_CAPACITY, STATUS_BUFFER_SIZE,
    STATUS_CAPACITY, TERMINATOR,
};
