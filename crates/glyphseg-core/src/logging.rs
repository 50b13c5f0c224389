#![forbid(unsafe_code)]

//! Diagnostic events for cluster decoding.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here and
//! at the crate root. Without it, same-named macros expand to nothing, so
//! `crate::debug!` and `glyphseg_core::debug!` compile either way and cost
//! nothing when disabled.
//!
//! The `tracing-json` feature adds `init_json` for hosts without a
//! subscriber of their own.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing without the `tracing` feature.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Env var holding the filter directives for [`init_json`].
#[cfg(feature = "tracing-json")]
pub const LOG_FILTER_ENV: &str = "GLYPHSEG_LOG";

/// Install a global JSON subscriber writing to stderr.
///
/// Directives come from `GLYPHSEG_LOG` (e.g. `glyphseg_core=debug`),
/// defaulting to `warn`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}
