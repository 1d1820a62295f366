//! Diagnostic logging.
//!
//! Logs go to stderr and are off unless `RUST_LOG` asks for them, e.g.
//! `RUST_LOG=kpsh=debug`, so they never mix with the shell's own messages
//! by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    match tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
    {
        Ok(()) => tracing::debug!("logging initialized"),
        Err(e) => eprintln!("Warning: Failed to initialize logging: {}", e),
    }
}
