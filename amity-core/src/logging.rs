use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::errors::{AmityError, Result};

const AMITY_TARGETS: [&str; 4] = ["amity", "amity_core", "amity_store", "tower_http"];

/// Filter directive used when `RUST_LOG` is unset.
///
/// Amity's own crates and the request trace layer log at `level`; every other
/// target stays at `warn` so hyper and tokio internals do not flood the output.
pub fn default_directive(level: &str) -> String {
    let mut directive = String::from("warn");
    for target in AMITY_TARGETS {
        directive.push(',');
        directive.push_str(target);
        directive.push('=');
        directive.push_str(level);
    }
    directive
}

/// Installs the fmt subscriber for an Amity binary.
///
/// `RUST_LOG` wins when set; otherwise [`default_directive`] is built from
/// `level` (`AMITY_LOG` / `--log-level`), falling back to `info`.
pub fn init_tracing(level: Option<&str>) -> Result<()> {
    let level = level.unwrap_or("info");
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(level))
            .map_err(|err| AmityError::Logging(format!("invalid log level {level:?}: {err}")))?,
    };

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .try_init()
        .map_err(|err| AmityError::Logging(err.to_string()))
}
