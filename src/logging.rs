//! Diagnostics via `tracing`, written to stderr.
//!
//! Command output goes to stdout; everything logged here goes to stderr so that
//! `plan --format names` stays pipeable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `-v` picks the level: none = warn,
/// one = info, two or more = debug.
pub fn init(verbosity: u8) {
  let default_level = match verbosity {
    0 => "warn",
    1 => "info",
    _ => "debug",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
    .init();
}
