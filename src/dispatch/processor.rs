//! Per-dispatch state machine.
//!
//! # States
//! ```text
//! Entry → ProxyChain → FinalMatch → Deliver → Done
//! ```
//! Entry runs on the caller (see `Router::submit`); everything after it runs
//! here, on the sequential dispatch worker.
//!
//! # Design Decisions
//! - The snapshot taken at Entry is used for the whole dispatch
//! - Matching proxies are collected in one pass against the Entry path; a
//!   proxy only reachable through a rewritten path is not discovered
//! - Each proxy receives the path as left by the previous one
//! - If the final path matches no route, the route accepted at Entry is used
//! - The parameter accumulator is an owned value threaded through each step

use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::config::DispatchConfig;
use crate::dispatch::delivery::Delivery;
use crate::dispatch::error::DispatchError;
use crate::dispatch::handshake::{Completion, Next};
use crate::observability::metrics;
use crate::resilience::timeouts::{self, within};
use crate::routing::entry::RouteMatch;
use crate::routing::parameters::{fold_into, merge_under, Parameters};
use crate::routing::table::{match_proxies, match_route, Snapshot};

/// An accepted dispatch waiting for the worker.
pub(crate) struct DispatchJob {
    pub id: Uuid,
    pub entries: Snapshot,
    pub path: String,
    pub parameters: Parameters,
    /// Route matched at Entry.
    pub provisional: RouteMatch,
    pub accepted_at: Instant,
    pub reply: Option<oneshot::Sender<Result<DispatchOutcome, DispatchError>>>,
}

/// Summary of a dispatch that reached its terminal route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub id: Uuid,
    /// Path after every proxy ran.
    pub path: String,
    /// Template of the route that was invoked.
    pub route: String,
    /// Parameters delivered to the route.
    pub parameters: Parameters,
    /// Number of proxies invoked.
    pub proxies: usize,
    /// True when the final path matched no route and the Entry route was used.
    pub fallback: bool,
}

/// Deadlines applied to handler continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTimeouts {
    pub proxy: Option<Duration>,
    pub route: Option<Duration>,
}

impl DispatchTimeouts {
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            proxy: timeouts::from_millis(config.proxy_timeout_ms),
            route: timeouts::from_millis(config.route_timeout_ms),
        }
    }

    /// Wait indefinitely for every continuation.
    pub fn unbounded() -> Self {
        Self {
            proxy: None,
            route: None,
        }
    }
}

/// State carried out of the proxy chain.
struct Chained {
    path: String,
    accumulator: Parameters,
    proxies: usize,
}

pub(crate) struct Processor {
    delivery: Delivery,
    timeouts: DispatchTimeouts,
}

impl Processor {
    pub fn new(delivery: Delivery, timeouts: DispatchTimeouts) -> Self {
        Self { delivery, timeouts }
    }

    /// Drive one accepted dispatch to completion.
    pub async fn process(
        &self,
        id: Uuid,
        entries: Snapshot,
        path: String,
        parameters: Parameters,
        provisional: RouteMatch,
    ) -> Result<DispatchOutcome, DispatchError> {
        let chained = self.proxy_chain(&entries, path, parameters).await?;

        let (route, fallback) = match match_route(&entries, &chained.path) {
            Some(route) => (route, false),
            None => {
                tracing::info!(
                    path = %chained.path,
                    route = %provisional.template,
                    "Rewritten path matches no route, keeping the accepted route"
                );
                (provisional, true)
            }
        };

        let template = route.template.clone();
        let parameters = self.deliver(route, chained.accumulator).await?;

        Ok(DispatchOutcome {
            id,
            path: chained.path,
            route: template,
            parameters,
            proxies: chained.proxies,
            fallback,
        })
    }

    async fn proxy_chain(
        &self,
        entries: &Snapshot,
        mut path: String,
        mut accumulator: Parameters,
    ) -> Result<Chained, DispatchError> {
        let proxies = match_proxies(entries, &path);
        let count = proxies.len();

        for proxy in proxies {
            let parameters = merge_under(proxy.parameters, &accumulator);
            let (next, continued) = Next::channel();
            let handler = proxy.handler;
            let current = path.clone();

            tracing::debug!(proxy = %proxy.template, path = %path, "Invoking proxy");
            metrics::record_proxy_invocation();
            self.delivery
                .deliver(move || handler.handle(current, parameters, next));

            let proceed = match within(self.timeouts.proxy, continued).await {
                Ok(Ok(proceed)) => proceed,
                Ok(Err(_)) => {
                    return Err(DispatchError::ProxyAbandoned {
                        pattern: proxy.template,
                    })
                }
                Err(elapsed) => {
                    return Err(DispatchError::ProxyTimeout {
                        pattern: proxy.template,
                        after: elapsed.0,
                    })
                }
            };

            if proceed.path != path {
                tracing::debug!(proxy = %proxy.template, from = %path, to = %proceed.path, "Path rewritten");
            }
            fold_into(&mut accumulator, proceed.parameters);
            path = proceed.path;
        }

        Ok(Chained {
            path,
            accumulator,
            proxies: count,
        })
    }

    async fn deliver(
        &self,
        route: RouteMatch,
        accumulator: Parameters,
    ) -> Result<Parameters, DispatchError> {
        let parameters = merge_under(route.parameters, &accumulator);
        let (completion, completed) = Completion::channel();
        let handler = route.handler;
        let delivered = parameters.clone();

        tracing::debug!(route = %route.template, "Invoking route");
        self.delivery
            .deliver(move || handler.handle(delivered, completion));

        match within(self.timeouts.route, completed).await {
            Ok(Ok(())) => Ok(parameters),
            Ok(Err(_)) => Err(DispatchError::RouteAbandoned {
                pattern: route.template,
            }),
            Err(elapsed) => Err(DispatchError::RouteTimeout {
                pattern: route.template,
                after: elapsed.0,
            }),
        }
    }
}
