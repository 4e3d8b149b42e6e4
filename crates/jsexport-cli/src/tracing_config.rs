//! Diagnostic logging for the CLI.
//!
//! The subscriber is only installed when `JSEXPORT_LOG` (or `RUST_LOG`) is set.
//! Output goes to stderr so generated JavaScript on stdout stays clean.
//!
//! ```bash
//! JSEXPORT_LOG=debug jsexport lower bundle.json
//! JSEXPORT_LOG="jsexport_lower::namespace=trace" jsexport lower bundle.json
//! ```

use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "JSEXPORT_LOG";

fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::from_default_env(),
    }
}

pub fn init_tracing() {
    if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let _ = fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
