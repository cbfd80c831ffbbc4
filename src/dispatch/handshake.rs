//! One-shot continuations handed to handlers.
//!
//! The dispatch worker parks on the receiving half while handler code runs on
//! the delivery context. Both continuations consume `self`, so a handler can
//! call back at most once; dropping one without calling it is observed by the
//! worker as an abandoned handshake.

use tokio::sync::oneshot;

use crate::routing::parameters::Parameters;

/// What a proxy hands back: the path to continue with and parameter overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proceed {
    pub path: String,
    pub parameters: Parameters,
}

/// Continuation given to a proxy.
#[derive(Debug)]
pub struct Next {
    tx: oneshot::Sender<Proceed>,
}

impl Next {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Proceed>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Continue the dispatch with `path`, folding `parameters` into the
    /// accumulated set (they override existing keys).
    pub fn proceed(self, path: impl Into<String>, parameters: Parameters) {
        let proceed = Proceed {
            path: path.into(),
            parameters,
        };
        if self.tx.send(proceed).is_err() {
            tracing::debug!("Proxy continued after its dispatch was released");
        }
    }
}

/// Completion signal given to a terminal route.
#[derive(Debug)]
pub struct Completion {
    tx: oneshot::Sender<()>,
}

impl Completion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    pub fn complete(self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("Route completed after its dispatch was released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_next_delivers_once() {
        let (next, rx) = Next::channel();
        std::thread::spawn(move || {
            let mut params = Parameters::new();
            params.insert("auth".into(), "1".into());
            next.proceed("/login", params);
        });

        let proceed = rx.await.unwrap();
        assert_eq!(proceed.path, "/login");
        assert_eq!(proceed.parameters["auth"], "1");
    }

    #[tokio::test]
    async fn test_dropped_completion_is_observable() {
        let (completion, rx) = Completion::channel();
        drop(completion);
        assert!(rx.await.is_err());
    }
}
