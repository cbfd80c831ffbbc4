//! Parameter maps and the merge rules applied while a dispatch progresses.
//!
//! # Merge Rules
//! - Pattern captures sit *under* whatever has already been accumulated:
//!   on a key collision the accumulated value wins.
//! - Overrides handed back by a proxy are folded *into* the accumulator and
//!   replace existing keys.

use std::collections::BTreeMap;

/// Parameter name → value. Ordered so logs and outcomes are deterministic.
pub type Parameters = BTreeMap<String, String>;

/// Lay `accumulated` over freshly captured parameters.
pub fn merge_under(mut captured: Parameters, accumulated: &Parameters) -> Parameters {
    for (key, value) in accumulated {
        captured.insert(key.clone(), value.clone());
    }
    captured
}

/// Fold proxy-supplied overrides into the accumulator.
pub fn fold_into(accumulated: &mut Parameters, overrides: Parameters) {
    accumulated.extend(overrides);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_accumulated_wins_over_captured() {
        let captured = params(&[("id", "42"), ("tab", "posts")]);
        let accumulated = params(&[("id", "7"), ("ref", "mail")]);

        let merged = merge_under(captured, &accumulated);
        assert_eq!(merged, params(&[("id", "7"), ("ref", "mail"), ("tab", "posts")]));
    }

    #[test]
    fn test_overrides_replace_accumulated() {
        let mut accumulated = params(&[("auth", "0"), ("id", "42")]);
        fold_into(&mut accumulated, params(&[("auth", "1")]));

        assert_eq!(accumulated, params(&[("auth", "1"), ("id", "42")]));
    }
}
