//! neoterm-am-socket - send a command to the NeoTerm:API app.
//!
//! Takes zero or one argument, forwards it over the API socket, prints the
//! command's stdout and stderr, and exits with the command's status.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use neoterm_am_socket::error::Result;
use neoterm_am_socket::{AmError, Client, Request, SocketConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log filter variable; logging is off unless it is set.
const LOG_ENV_VAR: &str = "NEOTERM_AM_LOG";

/// neoterm-am-socket - NeoTerm:API socket client
#[derive(Parser, Debug)]
#[command(name = "neoterm-am-socket")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Command payload, sent verbatim
    #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<OsString>,
}

impl Cli {
    /// Parse raw process arguments. Everything after argv[0] is positional,
    /// including values that look like flags or a bare `--`.
    fn parse_raw(raw: impl IntoIterator<Item = OsString>) -> Self {
        let mut raw = raw.into_iter();
        let argv0 = raw.next().unwrap_or_else(|| "neoterm-am-socket".into());
        let escaped = std::iter::once(argv0)
            .chain(std::iter::once(OsString::from("--")))
            .chain(raw);
        Self::parse_from(escaped)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse_raw(std::env::args_os());

    match run(cli).await {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let request = Request::from_args(cli.args)?;
    let client = Client::new(SocketConfig::from_env());

    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();
    let outcome = client.execute(request, &mut stdout, &mut stderr).await?;

    Ok(outcome.status)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn report(err: &AmError) {
    if err.is_protocol_violation() {
        tracing::warn!(error = %err, "peer sent a malformed status frame");
    }
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle, "{}", err);
    let _ = handle.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Vec<OsString> {
        let raw = std::iter::once("neoterm-am-socket")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::parse_raw(raw).args
    }

    #[test]
    fn test_no_arguments() {
        assert!(parse(&[]).is_empty());
    }

    #[test]
    fn test_flag_like_argument_is_payload() {
        assert_eq!(parse(&["--help"]), vec![OsString::from("--help")]);
        assert_eq!(parse(&["-V"]), vec![OsString::from("-V")]);
    }

    #[test]
    fn test_bare_double_dash_is_payload() {
        assert_eq!(parse(&["--"]), vec![OsString::from("--")]);
    }

    #[test]
    fn test_extra_arguments_are_kept_for_count() {
        assert_eq!(parse(&["a", "--b", "c"]).len(), 3);
    }
}
