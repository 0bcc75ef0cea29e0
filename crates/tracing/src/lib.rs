//! A minimal builder over `tracing-subscriber`: an env-filter layer plus a
//! formatting layer, installed once at process startup. The core itself only
//! emits `tracing` events (`tracing::debug!`/`warn!` calls throughout the
//! block tree, chain manager, and pool); this crate is how a binary wires
//! those up to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Builds the process-wide subscriber: `RUST_LOG`-driven filtering over a
/// compact stderr formatter.
#[derive(Debug, Default)]
pub struct RethTracer {
    default_directive: Option<String>,
}

impl RethTracer {
    /// A builder with no default directive (falls back to
    /// [`DEFAULT_FILTER`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = Some(directive.into());
        self
    }

    /// Installs this subscriber as the global default. Returns an error if
    /// a subscriber was already installed.
    pub fn init(self) -> Result<(), tracing_subscriber::util::TryInitError> {
        let directive = self.default_directive.unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        tracing_subscriber::registry().with(filter).with(fmt::layer()).try_init()
    }
}
