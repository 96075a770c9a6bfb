//! wgt library - expose command modules for testing

pub mod commands;
pub mod common;

pub use common::GlobalOpts;
pub use wgt_config as config_manager;
pub use wgt_logger as logger;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a `tracing` filter for library events
pub const LOG_ENV: &str = "WGT_LOG";

const LOG_TARGETS: &[&str] = &["wgt", "wgt_manifest", "wgt_wrapper"];

/// Install the `tracing` subscriber used by the library crates
///
/// `WGT_LOG` wins over `RUST_LOG`; without either, the level follows the
/// `-v` count. Events go to stderr so stdout stays machine readable.
pub fn init_tracing(opts: &GlobalOpts) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level_for(opts.verbosity_level()))));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn default_directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_follow_verbosity() {
        assert_eq!(
            default_directives(level_for(0)),
            "wgt=warn,wgt_manifest=warn,wgt_wrapper=warn"
        );
        assert!(default_directives(level_for(1)).contains("wgt_wrapper=debug"));
        assert!(default_directives(level_for(5)).contains("wgt_manifest=trace"));
    }
}
