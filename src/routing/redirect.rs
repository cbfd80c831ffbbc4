//! Declarative path rewriting proxy.
//!
//! A [`Redirect`] registered on `/old/:id` with target `/new/:id` rewrites
//! `/old/42` to `/new/42` and leaves the parameters untouched. Markers in the
//! target with no matching parameter are kept verbatim.

use regex::Captures;

use crate::dispatch::handshake::Next;
use crate::routing::entry::ProxyHandler;
use crate::routing::parameters::Parameters;
use crate::routing::pattern::marker;

#[derive(Debug, Clone)]
pub struct Redirect {
    target: String,
}

impl Redirect {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Substitute `parameters` into the target template.
    pub fn rewrite(&self, parameters: &Parameters) -> String {
        marker()
            .replace_all(&self.target, |caps: &Captures<'_>| {
                let token = &caps[0];
                parameters
                    .get(&token[1..])
                    .cloned()
                    .unwrap_or_else(|| token.to_string())
            })
            .into_owned()
    }
}

impl ProxyHandler for Redirect {
    fn handle(&self, path: String, parameters: Parameters, next: Next) {
        let rewritten = self.rewrite(&parameters);
        tracing::debug!(from = %path, to = %rewritten, "Redirecting");
        next.proceed(rewritten, Parameters::new());
    }
}
