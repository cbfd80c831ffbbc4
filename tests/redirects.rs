//! Declarative tables: configuration file → redirects + routes → dispatch.

use std::io::Write;

use link_router::config::load_config;
use link_router::Router;

mod common;

use common::{params, Recorder};

const TABLE: &str = r#"
[dispatch]
proxy_timeout_ms = 250
route_timeout_ms = 250

[[routes]]
name = "user"
pattern = "/users/:id"

[[routes]]
name = "short-user"
pattern = "/u/:id"

[[redirects]]
pattern = "/u/:id"
target = "/users/:id"
"#;

#[tokio::test]
async fn test_configured_redirect_rewrites_to_route() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();
    let config = load_config(file.path()).unwrap();

    let router = Router::new(&config.dispatch).unwrap();
    let mut calls = Recorder::new();
    for route in &config.routes {
        let name: &'static str = if route.name == "user" { "user" } else { "short-user" };
        calls.route(&router, &route.pattern, name);
    }
    router.register_redirects(&config.redirects);

    let outcome = router
        .submit_link("myapp://u/42?from=share")
        .unwrap()
        .outcome()
        .await
        .unwrap();

    let call = calls.next().await;
    assert_eq!(call.handler, "user");
    assert_eq!(call.parameters, params(&[("from", "share"), ("id", "42")]));
    assert_eq!(outcome.path, "/users/42");
    assert_eq!(outcome.route, "/users/:id");
    assert_eq!(outcome.proxies, 1);
}
