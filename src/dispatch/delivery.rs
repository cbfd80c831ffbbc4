//! Delivery context: where proxy and route handler code runs.

use tokio::runtime::Handle;

use crate::dispatch::error::RouterError;

/// Runs handler invocations on a tokio runtime, detached from the dispatch
/// worker that waits for them.
#[derive(Debug, Clone)]
pub struct Delivery {
    handle: Handle,
}

impl Delivery {
    /// Deliver on the runtime the caller is running in.
    pub fn current() -> Result<Self, RouterError> {
        Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| RouterError::NoRuntime)
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Run `invocation` asynchronously on the delivery runtime.
    pub fn deliver<F>(&self, invocation: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.spawn(async move { invocation() });
    }
}
