//! Deep-link router with an intercepting proxy chain.
//!
//! # Architecture Overview
//!
//! ```text
//!   register_proxy / register_route
//!   ───────────────────────────────▶ routing::table (newest first, arc-swap snapshots)
//!
//!   dispatch(path, params) / open(url)
//!   ──────────────────────────────────▶ Entry: snapshot + route match ──▶ false
//!                                              │ true
//!                                              ▼
//!                                     dispatch::worker (one at a time, FIFO)
//!                                              │
//!                     ┌────────────────────────┼──────────────────────────┐
//!                     ▼                        ▼                          ▼
//!               ProxyChain               FinalMatch                   Deliver
//!        proxy(path, params, Next)   re-match rewritten path   route(params, Completion)
//!                     │                                                   │
//!                     └──────────── dispatch::delivery (tokio) ───────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use link_router::{Completion, DispatchConfig, Next, Parameters, Router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::new(&DispatchConfig::default())?;
//!
//! router.register_route("/users/:id", |params: Parameters, done: Completion| {
//!     println!("showing user {}", params["id"]);
//!     done.complete();
//! });
//! router.register_proxy("/users/:id", |path: String, _: Parameters, next: Next| {
//!     let mut extra = Parameters::new();
//!     extra.insert("auth".into(), "1".into());
//!     next.proceed(path, extra);
//! });
//!
//! assert!(router.open_str("myapp://users/42"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod lifecycle;
pub mod link;
pub mod observability;
pub mod resilience;
pub mod router;
pub mod routing;

pub use config::{DispatchConfig, RouterConfig};
pub use dispatch::{Completion, DispatchError, DispatchOutcome, DispatchTimeouts, Next, RouterError};
pub use router::{DispatchTicket, Router};
pub use routing::{EntryKind, Parameters, ProxyHandler, RouteHandler};
