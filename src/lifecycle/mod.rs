//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Router::new:
//!     Shutdown created → dispatch worker subscribes → worker spawned
//!
//! Router::shutdown:
//!     Signal sent → worker aborts the in-flight dispatch → queue dropped
//!
//! Router dropped:
//!     Queue sender dropped → worker drains queued dispatches → exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
