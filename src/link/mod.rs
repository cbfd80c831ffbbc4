//! Deep-link tokenization.
//!
//! # Responsibilities
//! - Turn a URL into the path key the router matches on
//! - Turn its query string into the initial parameters of a dispatch
//!
//! # Path Construction
//! ```text
//! myapp://users/42?tab=likes   → "/users/42"   { tab: likes }
//! myapp://settings             → "/settings"
//! https://example.com/a/b      → "/example.com/a/b"
//! /users/42?tab=likes          → "/users/42"   { tab: likes }
//! /users/42#top                → "/users/42"
//! ```
//!
//! # Design Decisions
//! - The host is the first path segment: custom schemes put the screen there
//! - A repeated query key keeps its last value
//! - Fragments never reach the router, for URLs and bare paths alike
//! - URLs without a hierarchical part (`mailto:x`) are not routable

use url::{form_urlencoded, Url};

use crate::routing::parameters::Parameters;

/// Split a parsed URL into a path key and query parameters.
pub fn tokenize(url: &Url) -> Option<(String, Parameters)> {
    if url.cannot_be_a_base() {
        return None;
    }

    let path = match url.host_str() {
        Some(host) if !host.is_empty() => format!("/{}{}", host, url.path()),
        _ if url.path().starts_with('/') => url.path().to_string(),
        _ => format!("/{}", url.path()),
    };

    let parameters = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    Some((path, parameters))
}

/// Tokenize either an absolute URL or a bare `/path?query` string.
pub fn tokenize_str(link: &str) -> Option<(String, Parameters)> {
    if link.starts_with('/') {
        let link = link.split_once('#').map_or(link, |(before, _)| before);
        let (path, query) = match link.split_once('?') {
            Some((path, query)) => (path, query),
            None => (link, ""),
        };
        let parameters = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        return Some((path.to_string(), parameters));
    }

    match Url::parse(link) {
        Ok(url) => tokenize(&url),
        Err(e) => {
            tracing::debug!(link, error = %e, "Link could not be parsed");
            None
        }
    }
}
