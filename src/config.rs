//! Endpoint and invocation configuration.
//!
//! The socket path is fixed at build time through `NEOTERM_AM_SOCKET_PATH`
//! and may be redirected at run time with the `NEOTERM_AM_SOCKET` variable.

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::{AmError, Result};

/// Socket path used when nothing overrides it.
pub const DEFAULT_SOCKET_PATH: &str = match option_env!("NEOTERM_AM_SOCKET_PATH") {
    Some(path) => path,
    None => "/data/data/io.neoterm/files/apps/io.neoterm.api/neoterm-am.sock",
};

/// Run-time override for the socket path.
pub const SOCKET_ENV_VAR: &str = "NEOTERM_AM_SOCKET";

/// Resolved endpoint for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConfig {
    path: PathBuf,
}

impl SocketConfig {
    /// Use an explicit socket path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve from the environment, falling back to [`DEFAULT_SOCKET_PATH`].
    pub fn from_env() -> Self {
        Self::resolve(std::env::var_os(SOCKET_ENV_VAR))
    }

    fn resolve(override_path: Option<OsString>) -> Self {
        match override_path {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(DEFAULT_SOCKET_PATH),
        }
    }

    /// Get the socket path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}

/// Request body built from the positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    body: Bytes,
}

impl Request {
    /// Build a request from the raw positional arguments.
    ///
    /// Zero arguments give an empty body; more than one is a usage error.
    pub fn from_args(mut args: Vec<OsString>) -> Result<Self> {
        if args.len() > 1 {
            return Err(AmError::Usage {
                received: args.len(),
            });
        }
        Ok(match args.pop() {
            Some(arg) => Self::new(arg.into_vec()),
            None => Self::default(),
        })
    }

    /// Create a request with the given body.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }

    /// Raw request bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into the raw body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_non_empty_override() {
        let config = SocketConfig::resolve(Some("/tmp/am.sock".into()));
        assert_eq!(config.path(), Path::new("/tmp/am.sock"));
    }

    #[test]
    fn test_resolve_ignores_empty_override() {
        let config = SocketConfig::resolve(Some(OsString::new()));
        assert_eq!(config, SocketConfig::default());

        let config = SocketConfig::resolve(None);
        assert_eq!(config.path(), Path::new(DEFAULT_SOCKET_PATH));
    }

    #[test]
    fn test_no_arguments_is_empty_body() {
        let request = Request::from_args(Vec::new()).unwrap();
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_single_argument_is_verbatim() {
        let request = Request::from_args(vec!["--es com.example 'a b'".into()]).unwrap();
        assert_eq!(&request.body()[..], b"--es com.example 'a b'");
    }

    #[test]
    fn test_non_utf8_argument_is_preserved() {
        let raw = vec![0x66, 0xff, 0x6f];
        let request = Request::from_args(vec![OsString::from_vec(raw.clone())]).unwrap();
        assert_eq!(request.into_body(), Bytes::from(raw));
    }

    #[test]
    fn test_two_arguments_is_usage_error() {
        let err = Request::from_args(vec!["a".into(), "b".into()]).unwrap_err();
        assert!(matches!(err, AmError::Usage { received: 2 }));
        assert!(err.to_string().ends_with("received 2"));
    }
}
