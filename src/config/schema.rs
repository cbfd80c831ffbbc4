//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Dispatch worker settings.
    pub dispatch: DispatchConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Declared terminal routes (used by the CLI).
    pub routes: Vec<RouteConfig>,

    /// Declared path rewrites, registered as proxies.
    pub redirects: Vec<RedirectConfig>,
}

/// Dispatch worker settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DispatchConfig {
    /// How long a proxy may take to continue, in milliseconds (0 = forever).
    pub proxy_timeout_ms: u64,

    /// How long a route may take to complete, in milliseconds (0 = forever).
    pub route_timeout_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            proxy_timeout_ms: 30_000,
            route_timeout_ms: 30_000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// A named terminal route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Route identifier for logging and output.
    pub name: String,

    /// Route template, e.g. `/users/:id`.
    pub pattern: String,
}

/// A path rewrite applied before route selection.
///
/// A link is only accepted when some route matches it as given, so the
/// redirect's `pattern` also needs a route (see
/// [`unreachable_redirects`](crate::config::validation::unreachable_redirects)).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RedirectConfig {
    /// Template the rewrite applies to, e.g. `/u/:id`.
    pub pattern: String,

    /// Replacement path; markers are filled from the captured parameters.
    pub target: String,
}
