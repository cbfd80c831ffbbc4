//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check templates are rooted paths
//! - Check redirect targets only use markers their pattern captures
//! - Detect duplicate route names
//! - Flag redirects that no configured route accepts (warning only)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Unreachable redirects are logged as warnings by the loader, not errors

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{RedirectConfig, RouterConfig};
use crate::routing::pattern::{marker, marker_names, Pattern};

/// Stand-in segment substituted for markers when matching a redirect pattern.
const SAMPLE_SEGMENT: &str = "sample";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route '{name}': pattern '{pattern}' must start with '/'")]
    RouteNotRooted { name: String, pattern: String },

    #[error("route name '{0}' is declared more than once")]
    DuplicateRouteName(String),

    #[error("redirect '{pattern}': pattern must start with '/'")]
    RedirectNotRooted { pattern: String },

    #[error("redirect '{pattern}': target '{target}' must start with '/'")]
    TargetNotRooted { pattern: String, target: String },

    #[error("redirect '{pattern}': target uses ':{marker}' which the pattern does not capture")]
    UnknownMarker { pattern: String, marker: String },
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for route in &config.routes {
        if !route.pattern.starts_with('/') {
            errors.push(ValidationError::RouteNotRooted {
                name: route.name.clone(),
                pattern: route.pattern.clone(),
            });
        }
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
    }

    for redirect in &config.redirects {
        if !redirect.pattern.starts_with('/') {
            errors.push(ValidationError::RedirectNotRooted {
                pattern: redirect.pattern.clone(),
            });
        }
        if !redirect.target.starts_with('/') {
            errors.push(ValidationError::TargetNotRooted {
                pattern: redirect.pattern.clone(),
                target: redirect.target.clone(),
            });
        }
        let captured = marker_names(&redirect.pattern);
        for marker in marker_names(&redirect.target) {
            if !captured.contains(&marker) {
                errors.push(ValidationError::UnknownMarker {
                    pattern: redirect.pattern.clone(),
                    marker,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Redirects whose pattern no configured route matches.
///
/// Markers in the redirect pattern are replaced by a sample segment and the
/// resulting path is matched against every route.
pub fn unreachable_redirects(config: &RouterConfig) -> Vec<&RedirectConfig> {
    let routes: Vec<Pattern> = config
        .routes
        .iter()
        .map(|route| Pattern::compile(&route.pattern))
        .collect();

    config
        .redirects
        .iter()
        .filter(|redirect| {
            let sample = marker().replace_all(&redirect.pattern, SAMPLE_SEGMENT);
            !routes.iter().any(|route| route.captures(&sample).is_some())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RedirectConfig, RouteConfig};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RouterConfig::default();
        config.routes.push(RouteConfig {
            name: "user".into(),
            pattern: "users/:id".into(),
        });
        config.routes.push(RouteConfig {
            name: "user".into(),
            pattern: "/people/:id".into(),
        });
        config.redirects.push(RedirectConfig {
            pattern: "/u/:id".into(),
            target: "/users/:uid".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::RouteNotRooted {
                    name: "user".into(),
                    pattern: "users/:id".into(),
                },
                ValidationError::DuplicateRouteName("user".into()),
                ValidationError::UnknownMarker {
                    pattern: "/u/:id".into(),
                    marker: "uid".into(),
                },
            ]
        );
    }

    #[test]
    fn test_redirect_without_accepting_route_is_unreachable() {
        let mut config = RouterConfig::default();
        config.routes.push(RouteConfig {
            name: "user".into(),
            pattern: "/users/:id".into(),
        });
        config.redirects.push(RedirectConfig {
            pattern: "/u/:id".into(),
            target: "/users/:id".into(),
        });
        config.redirects.push(RedirectConfig {
            pattern: "/users/:id/old".into(),
            target: "/users/:id".into(),
        });
        config.redirects.push(RedirectConfig {
            pattern: "/USERS/:uid".into(),
            target: "/users/:uid".into(),
        });

        let unreachable = unreachable_redirects(&config);
        let patterns: Vec<&str> = unreachable.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, ["/u/:id", "/users/:id/old"]);

        config.routes.push(RouteConfig {
            name: "short-user".into(),
            pattern: "/u/:id".into(),
        });
        assert_eq!(unreachable_redirects(&config).len(), 1);
    }
}
