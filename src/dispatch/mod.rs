//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Router::submit (caller thread)
//!     → Entry: snapshot + terminal match → accept or reject
//!     → worker.rs queue (FIFO)
//!
//! Dispatch worker (one dispatch at a time)
//!     → processor.rs ProxyChain
//!         → delivery.rs runs each proxy on the delivery runtime
//!         → handshake.rs Next awaited (bounded by resilience::timeouts)
//!     → processor.rs FinalMatch
//!     → processor.rs Deliver
//!         → delivery.rs runs the route
//!         → handshake.rs Completion awaited
//!     → outcome to ticket, logs, metrics
//! ```
//!
//! # Design Decisions
//! - Dispatch ordering is serialized; handler execution is not
//! - Continuations are one-shot channels, so "exactly once" is enforced by
//!   ownership and a forgotten callback is detected when it is dropped

pub mod delivery;
pub mod error;
pub mod handshake;
pub mod processor;
pub(crate) mod worker;

pub use delivery::Delivery;
pub use error::{DispatchError, RouterError};
pub use handshake::{Completion, Next, Proceed};
pub use processor::{DispatchOutcome, DispatchTimeouts};
