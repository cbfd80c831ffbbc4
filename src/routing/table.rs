//! Route table storage and lookup.
//!
//! # Responsibilities
//! - Store registered entries, newest first
//! - Hand out consistent snapshots to dispatches
//! - Find the first matching entry of a given kind
//!
//! # Design Decisions
//! - Readers load an `Arc` snapshot without locking
//! - Writers serialize on a mutex and publish a fresh sequence atomically,
//!   so no reader ever sees a partially inserted entry
//! - Head insertion: a later registration shadows an earlier overlapping one

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::routing::entry::{EntryKind, Match, ProxyMatch, RouteEntry, RouteMatch};
use crate::routing::parameters::Parameters;

/// Immutable view of the table taken once per dispatch.
pub type Snapshot = Arc<Vec<RouteEntry>>;

/// Ordered, concurrently readable collection of route entries.
pub struct RouteTable {
    entries: ArcSwap<Vec<RouteEntry>>,
    writer: Mutex<()>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    /// Insert `entry` ahead of every existing entry.
    pub fn register(&self, entry: RouteEntry) {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.entries.load();
        let mut next = Vec::with_capacity(current.len() + 1);
        let kind = entry.kind();
        let template = entry.pattern().template().to_string();
        next.push(entry);
        next.extend(current.iter().cloned());
        let len = next.len();
        self.entries.store(Arc::new(next));

        metrics::record_table_size(len);
        tracing::debug!(kind = %kind, template = %template, entries = len, "Entry registered");
    }

    /// Current ordering of the table.
    pub fn snapshot(&self) -> Snapshot {
        self.entries.load_full()
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("entries", &*self.entries.load())
            .finish()
    }
}

/// First entry of `kind` matching `path`, in table order.
pub fn match_first<'a>(
    entries: &'a [RouteEntry],
    path: &str,
    kind: EntryKind,
) -> Option<(&'a RouteEntry, Parameters)> {
    entries
        .iter()
        .filter(|entry| entry.kind() == kind)
        .find_map(|entry| entry.pattern().captures(path).map(|params| (entry, params)))
}

/// First terminal route matching `path`.
pub fn match_route(entries: &[RouteEntry], path: &str) -> Option<RouteMatch> {
    let (entry, parameters) = match_first(entries, path, EntryKind::Route)?;
    let binding = entry.as_route()?;
    Some(Match {
        handler: Arc::clone(binding.handler()),
        template: binding.pattern().template().to_string(),
        parameters,
    })
}

/// Every proxy matching `path`, in table order.
pub fn match_proxies(entries: &[RouteEntry], path: &str) -> Vec<ProxyMatch> {
    entries
        .iter()
        .filter_map(RouteEntry::as_proxy)
        .filter_map(|binding| binding.evaluate(path))
        .collect()
}
