//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     template + handler
//!     → pattern.rs (compile anchored matcher, collect capture names)
//!     → entry.rs (Proxy or Route entry)
//!     → table.rs (insert at head, publish new snapshot)
//!
//! Lookup (per dispatch):
//!     table.rs snapshot
//!     → match_route / match_proxies (evaluate entries in order)
//!     → Match { handler, captured parameters } or no match
//! ```
//!
//! # Design Decisions
//! - Most recent registration is checked first
//! - Proxies and routes live in one ordered list
//! - Deterministic: same snapshot and path always give the same match

pub mod entry;
pub mod parameters;
pub mod pattern;
pub mod redirect;
pub mod table;

pub use entry::{EntryKind, Match, ProxyHandler, ProxyMatch, RouteEntry, RouteHandler, RouteMatch};
pub use parameters::Parameters;
pub use pattern::Pattern;
pub use redirect::Redirect;
pub use table::{RouteTable, Snapshot};
