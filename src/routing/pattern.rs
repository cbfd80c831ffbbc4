//! Route template compilation.
//!
//! # Responsibilities
//! - Turn a template such as `/users/:id/posts/:post` into an anchored matcher
//! - Record capture names in the order they appear in the template
//! - Extract captured parameters from a concrete path
//!
//! # Design Decisions
//! - Matching is case-insensitive; captured values keep the path's casing
//! - Whole-path anchoring with an optional trailing `/`
//! - Compilation never fails: a template that cannot be built degrades to a
//!   pattern that matches nothing

use std::fmt;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::routing::parameters::Parameters;

/// Capture group substituted for every named segment.
const SEGMENT_CAPTURE: &str = "([^/]+)";

/// Named segment marker: `:` followed by an identifier.
pub(crate) fn marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r":[A-Za-z0-9_-]+").expect("marker expression is valid"))
}

/// Names of every marker in `template`, in order of appearance.
pub fn marker_names(template: &str) -> Vec<String> {
    marker()
        .find_iter(template)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

/// A compiled route template.
#[derive(Clone)]
pub struct Pattern {
    template: String,
    matcher: Option<Regex>,
    names: Vec<String>,
}

impl Pattern {
    /// Compile a template.
    pub fn compile(template: &str) -> Self {
        let mut source = String::with_capacity(template.len() + 8);
        source.push('^');

        let mut names = Vec::new();
        let mut literal_start = 0;
        for m in marker().find_iter(template) {
            source.push_str(&regex::escape(&template[literal_start..m.start()]));
            source.push_str(SEGMENT_CAPTURE);
            names.push(m.as_str()[1..].to_string());
            literal_start = m.end();
        }
        source.push_str(&regex::escape(&template[literal_start..]));
        source.push_str("/?$");

        let matcher = match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(template, error = %e, "Route template rejected, it will never match");
                None
            }
        };

        Self {
            template: template.to_string(),
            matcher,
            names,
        }
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Capture names in template order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether the template compiled into a usable matcher.
    pub fn is_matchable(&self) -> bool {
        self.matcher.is_some()
    }

    /// Match `path` and return its captured parameters.
    ///
    /// A duplicated name keeps the value of its last occurrence.
    pub fn captures(&self, path: &str) -> Option<Parameters> {
        let matcher = self.matcher.as_ref()?;
        let captures = matcher.captures(path)?;

        // Group count and name count must agree, otherwise treat as no match.
        if captures.len() - 1 != self.names.len() {
            return None;
        }

        let mut parameters = Parameters::new();
        for (index, name) in self.names.iter().enumerate() {
            let value = captures.get(index + 1)?;
            parameters.insert(name.clone(), value.as_str().to_string());
        }
        Some(parameters)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("template", &self.template)
            .field("names", &self.names)
            .field("matchable", &self.is_matchable())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_in_template_order() {
        let pattern = Pattern::compile("/users/:user_id/posts/:post-id");
        assert_eq!(pattern.names(), ["user_id", "post-id"]);

        let params = pattern.captures("/users/ada/posts/17").unwrap();
        let values: Vec<&str> = pattern
            .names()
            .iter()
            .map(|name| params[name].as_str())
            .collect();
        assert_eq!(values, ["ada", "17"]);
    }

    #[test]
    fn test_literal_template() {
        let pattern = Pattern::compile("/settings");
        assert!(pattern.names().is_empty());
        assert_eq!(pattern.captures("/settings"), Some(Parameters::new()));
        assert_eq!(pattern.captures("/settings/"), Some(Parameters::new()));
        assert_eq!(pattern.captures("/settings/privacy"), None);
        assert_eq!(pattern.captures("/app/settings"), None);
    }

    #[test]
    fn test_case_insensitive_literals() {
        let pattern = Pattern::compile("/Users/:id");
        let params = pattern.captures("/USERS/AbC").unwrap();
        assert_eq!(params["id"], "AbC"); // Value keeps its casing
    }

    #[test]
    fn test_capture_stops_at_separator() {
        let pattern = Pattern::compile("/files/:name");
        assert!(pattern.captures("/files/a/b").is_none());
        assert!(pattern.captures("/files/").is_none());
    }

    #[test]
    fn test_regex_metacharacters_match_literally() {
        let pattern = Pattern::compile("/v1.0/(beta)/:id");
        assert!(pattern.is_matchable());
        assert!(pattern.captures("/v1.0/(beta)/9").is_some());
        assert!(pattern.captures("/v1x0/(beta)/9").is_none());
        assert!(pattern.captures("/v1.0/beta/9").is_none());
    }

    #[test]
    fn test_repeated_name_keeps_last_value() {
        let pattern = Pattern::compile("/:id/compare/:id");
        let params = pattern.captures("/a/compare/b").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["id"], "b");
    }

    #[test]
    fn test_marker_names() {
        assert_eq!(marker_names("/old/:id/:slug"), ["id", "slug"]);
        assert!(marker_names("/plain").is_empty());
    }
}
