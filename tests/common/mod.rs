//! Shared utilities for dispatch integration tests.

use std::time::Duration;

use link_router::{Completion, DispatchConfig, Next, Parameters, Router};
use tokio::sync::mpsc;

/// Build a router on the test runtime with short handler deadlines.
#[allow(dead_code)]
pub fn router() -> Router {
    Router::new(&DispatchConfig {
        proxy_timeout_ms: 200,
        route_timeout_ms: 200,
    })
    .unwrap()
}

/// Build a parameter map from pairs.
pub fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A call observed by a recording handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub handler: &'static str,
    pub path: Option<String>,
    pub parameters: Parameters,
}

/// Channel collecting handler invocations in the order they happen.
pub struct Recorder {
    tx: mpsc::UnboundedSender<Call>,
    rx: mpsc::UnboundedReceiver<Call>,
}

impl Recorder {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Register a route that records its parameters and completes.
    pub fn route(&self, router: &Router, pattern: &str, name: &'static str) {
        let tx = self.tx.clone();
        router.register_route(pattern, move |parameters: Parameters, done: Completion| {
            let _ = tx.send(Call {
                handler: name,
                path: None,
                parameters,
            });
            done.complete();
        });
    }

    /// Register a proxy that records its input, then continues to
    /// `rewrite` (or the same path) with `inject` as overrides.
    pub fn proxy(
        &self,
        router: &Router,
        pattern: &str,
        name: &'static str,
        rewrite: Option<&'static str>,
        inject: Parameters,
    ) {
        let tx = self.tx.clone();
        router.register_proxy(pattern, move |path: String, parameters: Parameters, next: Next| {
            let _ = tx.send(Call {
                handler: name,
                path: Some(path.clone()),
                parameters,
            });
            next.proceed(rewrite.map(str::to_string).unwrap_or(path), inject.clone());
        });
    }

    /// Next recorded call, failing the test if none arrives in time.
    pub async fn next(&mut self) -> Call {
        tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("handler was not invoked in time")
            .expect("recorder channel closed")
    }

    /// Assert nothing else was recorded.
    #[allow(dead_code)]
    pub fn assert_idle(&mut self) {
        assert!(self.rx.try_recv().is_err(), "unexpected handler invocation");
    }
}
