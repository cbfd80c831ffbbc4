//! Route table entries and the handler contracts they carry.
//!
//! # Responsibilities
//! - Define the proxy and terminal handler contracts
//! - Bind a handler to its compiled pattern
//! - Evaluate a single entry against a path
//!
//! # Design Decisions
//! - Proxies and routes share one enum so a single ordered list expresses
//!   priority for both kinds
//! - Entries are immutable and cheap to clone (shared pattern and handler)

use std::fmt;
use std::sync::Arc;

use crate::dispatch::handshake::{Completion, Next};
use crate::routing::parameters::Parameters;
use crate::routing::pattern::Pattern;

/// Middleware invoked before the terminal route.
///
/// Implementations must call [`Next::proceed`] exactly once, from any thread,
/// with the (possibly rewritten) path and any parameters to inject.
pub trait ProxyHandler: Send + Sync + 'static {
    fn handle(&self, path: String, parameters: Parameters, next: Next);
}

impl<F> ProxyHandler for F
where
    F: Fn(String, Parameters, Next) + Send + Sync + 'static,
{
    fn handle(&self, path: String, parameters: Parameters, next: Next) {
        self(path, parameters, next)
    }
}

/// Terminal handler. Must call [`Completion::complete`] exactly once.
pub trait RouteHandler: Send + Sync + 'static {
    fn handle(&self, parameters: Parameters, completion: Completion);
}

impl<F> RouteHandler for F
where
    F: Fn(Parameters, Completion) + Send + Sync + 'static,
{
    fn handle(&self, parameters: Parameters, completion: Completion) {
        self(parameters, completion)
    }
}

/// Which side of the table an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Proxy,
    Route,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Proxy => "proxy",
            EntryKind::Route => "route",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A handler bound to the pattern it answers for.
pub struct Binding<H: ?Sized> {
    pattern: Arc<Pattern>,
    handler: Arc<H>,
}

impl<H: ?Sized> Binding<H> {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }

    /// Evaluate this binding against `path`.
    pub fn evaluate(&self, path: &str) -> Option<Match<H>> {
        self.pattern.captures(path).map(|parameters| Match {
            handler: Arc::clone(&self.handler),
            template: self.pattern.template().to_string(),
            parameters,
        })
    }
}

impl<H: ?Sized> Clone for Binding<H> {
    fn clone(&self) -> Self {
        Self {
            pattern: Arc::clone(&self.pattern),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// One registered entry.
#[derive(Clone)]
pub enum RouteEntry {
    Proxy(Binding<dyn ProxyHandler>),
    Route(Binding<dyn RouteHandler>),
}

impl RouteEntry {
    /// Compile `template` and bind it to a proxy handler.
    pub fn proxy(template: &str, handler: impl ProxyHandler) -> Self {
        RouteEntry::Proxy(Binding {
            pattern: Arc::new(Pattern::compile(template)),
            handler: Arc::new(handler),
        })
    }

    /// Compile `template` and bind it to a terminal handler.
    pub fn route(template: &str, handler: impl RouteHandler) -> Self {
        RouteEntry::Route(Binding {
            pattern: Arc::new(Pattern::compile(template)),
            handler: Arc::new(handler),
        })
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            RouteEntry::Proxy(_) => EntryKind::Proxy,
            RouteEntry::Route(_) => EntryKind::Route,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        match self {
            RouteEntry::Proxy(binding) => binding.pattern(),
            RouteEntry::Route(binding) => binding.pattern(),
        }
    }

    pub fn as_proxy(&self) -> Option<&Binding<dyn ProxyHandler>> {
        match self {
            RouteEntry::Proxy(binding) => Some(binding),
            RouteEntry::Route(_) => None,
        }
    }

    pub fn as_route(&self) -> Option<&Binding<dyn RouteHandler>> {
        match self {
            RouteEntry::Route(binding) => Some(binding),
            RouteEntry::Proxy(_) => None,
        }
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("kind", &self.kind())
            .field("template", &self.pattern().template())
            .finish()
    }
}

/// Result of evaluating one entry against one path.
pub struct Match<H: ?Sized> {
    pub handler: Arc<H>,
    /// Template of the matched entry, for logging and outcomes.
    pub template: String,
    pub parameters: Parameters,
}

pub type ProxyMatch = Match<dyn ProxyHandler>;
pub type RouteMatch = Match<dyn RouteHandler>;

impl<H: ?Sized> fmt::Debug for Match<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("template", &self.template)
            .field("parameters", &self.parameters)
            .finish()
    }
}
