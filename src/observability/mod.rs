//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and dispatch produce:
//!     → logging.rs (structured log events, one span per dispatch)
//!     → metrics.rs (counters, gauges, histograms)
//! ```
//!
//! # Design Decisions
//! - Dispatch ID (UUID v4) flows through every event of a dispatch
//! - Metrics are cheap (atomic increments through the facade)

pub mod logging;
pub mod metrics;
