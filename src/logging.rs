use std::io::IsTerminal;
use tracing_subscriber::{fmt, EnvFilter};

/// Logs go to stderr so `--stdout` output stays clean. `RUST_LOG` overrides the default level.
pub fn initialize_logger() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("codeclip=info"));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
