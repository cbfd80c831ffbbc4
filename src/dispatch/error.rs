//! Dispatch and router error definitions.

use std::time::Duration;

use thiserror::Error;

/// Reasons an accepted dispatch ended before its route completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A proxy did not continue within the configured deadline.
    #[error("proxy '{pattern}' did not continue within {after:?}")]
    ProxyTimeout { pattern: String, after: Duration },

    /// A proxy dropped its continuation without calling it.
    #[error("proxy '{pattern}' dropped its continuation")]
    ProxyAbandoned { pattern: String },

    /// The terminal route did not complete within the configured deadline.
    #[error("route '{pattern}' did not complete within {after:?}")]
    RouteTimeout { pattern: String, after: Duration },

    /// The terminal route dropped its completion without calling it.
    #[error("route '{pattern}' dropped its completion")]
    RouteAbandoned { pattern: String },

    /// The router shut down before the dispatch finished.
    #[error("router shut down before the dispatch finished")]
    Shutdown,
}

impl DispatchError {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            DispatchError::ProxyTimeout { .. } => "proxy_timeout",
            DispatchError::ProxyAbandoned { .. } => "proxy_abandoned",
            DispatchError::RouteTimeout { .. } => "route_timeout",
            DispatchError::RouteAbandoned { .. } => "route_abandoned",
            DispatchError::Shutdown => "shutdown",
        }
    }
}

/// Errors constructing a router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No tokio runtime was available to host the dispatch worker.
    #[error("a tokio runtime is required to start the router")]
    NoRuntime,
}
