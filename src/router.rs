//! Router facade: registration and dispatch entry point.
//!
//! # Responsibilities
//! - Register proxies and routes into the table
//! - Run the Entry step of a dispatch on the caller's thread
//! - Queue accepted dispatches for the sequential worker
//!
//! # Design Decisions
//! - `dispatch` answers synchronously; the proxy chain and route run later
//! - Rejection has no side effects: nothing is queued, no handler runs
//! - The router owns its table; there is no global instance

use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

use crate::config::{DispatchConfig, RedirectConfig};
use crate::dispatch::processor::{DispatchJob, DispatchTimeouts, Processor};
use crate::dispatch::worker::{self, DispatchQueue};
use crate::dispatch::{Delivery, DispatchError, DispatchOutcome, RouterError};
use crate::lifecycle::Shutdown;
use crate::link;
use crate::observability::metrics;
use crate::routing::entry::{ProxyHandler, RouteEntry, RouteHandler};
use crate::routing::parameters::Parameters;
use crate::routing::redirect::Redirect;
use crate::routing::table::{match_route, RouteTable};

/// Handle on an accepted dispatch.
#[derive(Debug)]
pub struct DispatchTicket {
    id: Uuid,
    rx: oneshot::Receiver<Result<DispatchOutcome, DispatchError>>,
}

impl DispatchTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the dispatch to finish.
    pub async fn outcome(self) -> Result<DispatchOutcome, DispatchError> {
        self.rx.await.unwrap_or(Err(DispatchError::Shutdown))
    }
}

/// Path-pattern router with a proxy chain.
pub struct Router {
    table: RouteTable,
    queue: DispatchQueue,
    shutdown: Shutdown,
    worker: JoinHandle<()>,
}

impl Router {
    /// Build a router on the current tokio runtime.
    ///
    /// Both the dispatch worker and handler delivery use that runtime.
    pub fn new(config: &DispatchConfig) -> Result<Self, RouterError> {
        let delivery = Delivery::current()?;
        let handle = delivery.handle().clone();
        Ok(Self::with_delivery(
            DispatchTimeouts::from_config(config),
            &handle,
            delivery,
        ))
    }

    /// Build a router whose worker runs on `runtime` and whose handlers run
    /// through `delivery`.
    pub fn with_delivery(timeouts: DispatchTimeouts, runtime: &Handle, delivery: Delivery) -> Self {
        let shutdown = Shutdown::new();
        let processor = Processor::new(delivery, timeouts);
        let (queue, task) = worker::spawn(runtime, processor, shutdown.subscribe());

        tracing::debug!(
            proxy_timeout = ?timeouts.proxy,
            route_timeout = ?timeouts.route,
            "Router started"
        );

        Self {
            table: RouteTable::new(),
            queue,
            shutdown,
            worker: task,
        }
    }

    /// Register a proxy. It takes priority over every earlier registration.
    pub fn register_proxy(&self, pattern: &str, handler: impl ProxyHandler) {
        self.table.register(RouteEntry::proxy(pattern, handler));
    }

    /// Register a terminal route. It shadows earlier overlapping routes.
    pub fn register_route(&self, pattern: &str, handler: impl RouteHandler) {
        self.table.register(RouteEntry::route(pattern, handler));
    }

    /// Register each redirect as a rewriting proxy, in order.
    pub fn register_redirects(&self, redirects: &[RedirectConfig]) {
        for redirect in redirects {
            self.register_proxy(&redirect.pattern, Redirect::new(redirect.target.clone()));
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Dispatch `path`. Returns `true` iff a route matched and the dispatch
    /// was queued.
    pub fn dispatch(&self, path: &str, parameters: Parameters) -> bool {
        self.submit(path, parameters).is_some()
    }

    /// Like [`Router::dispatch`], returning a ticket for the outcome.
    pub fn submit(&self, path: &str, parameters: Parameters) -> Option<DispatchTicket> {
        if self.shutdown.is_triggered() {
            tracing::debug!(path, "Router is shut down");
            metrics::record_rejected();
            return None;
        }

        let entries = self.table.snapshot();
        if entries.is_empty() {
            tracing::debug!(path, "Route table is empty");
            metrics::record_rejected();
            return None;
        }

        let Some(provisional) = match_route(&entries, path) else {
            tracing::debug!(path, "No route matched");
            metrics::record_rejected();
            return None;
        };

        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        tracing::debug!(dispatch_id = %id, path, route = %provisional.template, "Dispatch accepted");

        let job = DispatchJob {
            id,
            entries,
            path: path.to_string(),
            parameters,
            provisional,
            accepted_at: Instant::now(),
            reply: Some(tx),
        };

        if self.queue.push(job).is_err() {
            tracing::warn!(dispatch_id = %id, path, "Dispatch worker has stopped, dropping dispatch");
            return None;
        }

        Some(DispatchTicket { id, rx })
    }

    /// Tokenize `url` and dispatch it.
    pub fn open(&self, url: &Url) -> bool {
        match link::tokenize(url) {
            Some((path, parameters)) => self.dispatch(&path, parameters),
            None => false,
        }
    }

    /// Tokenize a URL or bare path string and dispatch it.
    pub fn open_str(&self, link: &str) -> bool {
        self.submit_link(link).is_some()
    }

    pub fn submit_link(&self, link: &str) -> Option<DispatchTicket> {
        let (path, parameters) = link::tokenize_str(link)?;
        self.submit(&path, parameters)
    }

    /// Stop the dispatch worker. The dispatch in flight ends with
    /// [`DispatchError::Shutdown`]; queued dispatches are dropped. Every
    /// later `dispatch` or `submit` is rejected.
    pub fn shutdown(&self) {
        if self.shutdown.trigger() {
            tracing::info!("Router shutdown requested");
        }
    }

    /// Whether the dispatch worker has exited.
    pub fn is_stopped(&self) -> bool {
        self.worker.is_finished()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
