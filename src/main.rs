//! link-router CLI.
//!
//! Builds a route table from a TOML file and dispatches each link given on
//! the command line, in order. Every route prints the parameters it receives
//! as one JSON line.
//!
//! A redirect only runs for links some route accepts as given, so the table
//! below needs a route for `/u/:id` next to the redirect that rewrites it:
//!
//! ```toml
//! [[routes]]
//! name = "user"
//! pattern = "/users/:id"
//!
//! [[routes]]
//! name = "short-user"
//! pattern = "/u/:id"
//!
//! [[routes]]
//! name = "settings"
//! pattern = "/settings"
//!
//! [[redirects]]
//! pattern = "/u/:id"
//! target = "/users/:id"
//! ```
//!
//! ```text
//! link-router --config routes.toml myapp://u/42?tab=likes /settings
//! {"route":"user","parameters":{"id":"42","tab":"likes"}}
//! {"route":"settings","parameters":{}}
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use link_router::config::{load_config, RouteConfig, RouterConfig};
use link_router::observability::logging::init_logging;
use link_router::{Completion, Parameters, Router};

#[derive(Parser)]
#[command(name = "link-router")]
#[command(about = "Dispatch deep links through a declarative route table", long_about = None)]
struct Cli {
    /// Route table and dispatch settings (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Links to dispatch: URLs (`myapp://users/42`) or paths (`/users/42`).
    #[arg(required = true)]
    links: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::info!(
        routes = config.routes.len(),
        redirects = config.redirects.len(),
        "link-router v0.1.0 starting"
    );

    let router = Router::new(&config.dispatch)?;
    for route in &config.routes {
        register_printing_route(&router, route);
    }
    router.register_redirects(&config.redirects);

    let mut failed = false;
    for link in &cli.links {
        let Some(ticket) = router.submit_link(link) else {
            tracing::warn!(link = %link, "No route for link");
            failed = true;
            continue;
        };

        if let Err(e) = ticket.outcome().await {
            tracing::error!(link = %link, error = %e, "Dispatch did not complete");
            failed = true;
        }
    }

    router.shutdown();
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn register_printing_route(router: &Router, route: &RouteConfig) {
    let name = route.name.clone();
    router.register_route(&route.pattern, move |parameters: Parameters, done: Completion| {
        println!("{}", json!({ "route": name, "parameters": parameters }));
        done.complete();
    });
}
