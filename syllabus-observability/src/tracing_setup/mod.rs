//! Tracing setup: subscriber installation, span macros, and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use syllabus_core::config::ObservabilityConfig;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "SYLLABUS_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `SYLLABUS_LOG` wins when set; otherwise `syllabus=<log_level>` from the
/// config. Only the first call has any effect.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));
    install(filter, config.json);
}

/// Install the global subscriber with an explicit filter (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter), false);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true);
        // Another subscriber may already be installed by the host.
        let _ = if json {
            builder
                .with_file(true)
                .with_line_number(true)
                .json()
                .try_init()
        } else {
            builder.try_init()
        };
    });
}

fn default_directive(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        "syllabus=info".to_string()
    } else {
        format!("syllabus={level}")
    }
}
