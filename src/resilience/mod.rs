//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch worker waiting on a handler:
//!     → timeouts.rs (bound the wait on Next / Completion)
//!     → On expiry: dispatch released with a timeout error
//! ```
//!
//! # Design Decisions
//! - A handler that never calls back must not starve the queue
//! - Deadlines come from configuration; zero restores the unbounded wait

pub mod timeouts;
