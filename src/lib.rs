//! # neoterm-am-socket
//!
//! Client for the NeoTerm:API unix socket.
//!
//! One command argument is sent to the API app, which answers with the
//! command's exit status, stdout and stderr. The client reproduces that
//! result locally.
//!
//! ## Protocol
//!
//! - **Request**: raw argument bytes, ended by closing the write half
//! - **Response**: status frame, then stdout frame, then stderr frame, each
//!   terminated by a NUL byte or end-of-stream (see [`protocol`])
//!
//! ## Example
//!
//! ```ignore
//! use neoterm_am_socket::{Client, Request, SocketConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let client = Client::new(SocketConfig::from_env());
//!     let outcome = client
//!         .execute(Request::new("battery-status"), &mut tokio::io::stdout(), &mut tokio::io::stderr())
//!         .await
//!         .unwrap();
//!
//!     std::process::exit(outcome.status.into());
//! }
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;

mod client;

pub use client::{exchange, Client, Outcome};
pub use config::{Request, SocketConfig};
pub use error::AmError;
