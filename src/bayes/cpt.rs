//! Conditional probability tables.
//!
//! CPTs arrive as arbitrarily nested JSON keyed by the sentinels `deeper`
//! and `skip`: `deeper` maps one parent value to the sub-table for that
//! value, `skip` is the shared sub-table for every parent value without an
//! explicit branch (path compression). A mapping without `deeper` is a leaf
//! distribution; remaining parents are irrelevant to it.

use std::collections::HashMap;

use serde_json::Value;

use crate::bayes::Sample;
use crate::error::{Error, Result};

const DEEPER_KEY: &str = "deeper";
const SKIP_KEY: &str = "skip";

const EMPTY_LEAF: &[(String, f64)] = &[];

/// A node's conditional probability table.
#[derive(Debug, Clone)]
pub enum Cpt {
    /// Terminal `value -> probability` distribution.
    Leaf(Vec<(String, f64)>),
    /// One level of parent-value dispatch.
    Branch {
        deeper: HashMap<String, Cpt>,
        skip: Option<Box<Cpt>>,
    },
}

impl Cpt {
    /// Build a table from its dynamic JSON encoding.
    ///
    /// Non-numeric entries in a leaf mapping are dropped rather than
    /// rejected: the definitions are trusted input, and a malformed path
    /// surfaces later as an empty distribution.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::definition("conditional probabilities must be a JSON object"))?;
        if let Some(deeper_value) = map.get(DEEPER_KEY) {
            let deeper_map = deeper_value
                .as_object()
                .ok_or_else(|| Error::definition("`deeper` must be a JSON object"))?;
            let mut deeper = HashMap::with_capacity(deeper_map.len());
            for (parent_value, sub) in deeper_map {
                deeper.insert(parent_value.clone(), Cpt::from_value(sub)?);
            }
            let skip = match map.get(SKIP_KEY) {
                Some(sub) => Some(Box::new(Cpt::from_value(sub)?)),
                None => None,
            };
            Ok(Cpt::Branch { deeper, skip })
        } else {
            let entries = map
                .iter()
                .filter_map(|(value, probability)| {
                    probability.as_f64().map(|p| (value.clone(), p))
                })
                .collect();
            Ok(Cpt::Leaf(entries))
        }
    }

    /// Resolve the leaf distribution for the given parent assignment.
    ///
    /// Descends one level per parent, in declaration order: the explicit
    /// `deeper` branch for that parent's value when present, the shared
    /// `skip` branch otherwise. A leaf reached early terminates the walk; a
    /// missing `skip` or a branch left over after all parents yields an
    /// empty distribution.
    pub fn leaf_given<'a>(&'a self, parent_names: &[String], sample: &Sample) -> &'a [(String, f64)] {
        let mut current = self;
        for parent in parent_names {
            let Cpt::Branch { deeper, skip } = current else {
                break;
            };
            let parent_value = sample.get(parent).map(String::as_str).unwrap_or("");
            current = match deeper.get(parent_value) {
                Some(sub) => sub,
                None => match skip {
                    Some(sub) => sub.as_ref(),
                    None => return EMPTY_LEAF,
                },
            };
        }
        match current {
            Cpt::Leaf(entries) => entries,
            Cpt::Branch { .. } => EMPTY_LEAF,
        }
    }

    /// Probability of `value` along a fully explicit `deeper` path.
    ///
    /// Unlike [`Cpt::leaf_given`] this never falls back to `skip`: the
    /// evidence must select an explicit branch at every level or the
    /// probability is zero.
    pub fn explicit_probability(&self, parent_values: &[&str], value: &str) -> f64 {
        let mut current = self;
        for parent_value in parent_values {
            match current {
                Cpt::Branch { deeper, .. } => match deeper.get(*parent_value) {
                    Some(sub) => current = sub,
                    None => return 0.0,
                },
                Cpt::Leaf(_) => return 0.0,
            }
        }
        match current {
            Cpt::Leaf(entries) => entries
                .iter()
                .find(|(candidate, _)| candidate == value)
                .map(|(_, probability)| *probability)
                .unwrap_or(0.0),
            Cpt::Branch { .. } => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(pairs: &[(&str, &str)]) -> Sample {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_leaf_distribution_parses() {
        let cpt = Cpt::from_value(&json!({"x": 0.25, "y": 0.75})).unwrap();
        let leaf = cpt.leaf_given(&[], &Sample::new());
        assert_eq!(leaf.len(), 2);
    }

    #[test]
    fn test_unseen_parent_value_takes_skip() {
        let cpt = Cpt::from_value(&json!({
            "deeper": {"p1": {"a": 1.0}},
            "skip": {"b": 1.0}
        }))
        .unwrap();
        let parents = vec!["P".to_string()];
        let leaf = cpt.leaf_given(&parents, &sample(&[("P", "p2")]));
        assert_eq!(leaf, &[("b".to_string(), 1.0)]);
    }

    #[test]
    fn test_missing_skip_yields_empty_leaf() {
        let cpt = Cpt::from_value(&json!({"deeper": {"p1": {"a": 1.0}}})).unwrap();
        let parents = vec!["P".to_string()];
        assert!(cpt.leaf_given(&parents, &sample(&[("P", "p2")])).is_empty());
    }

    #[test]
    fn test_early_leaf_ignores_remaining_parents() {
        // No `deeper` at the top: both declared parents are irrelevant.
        let cpt = Cpt::from_value(&json!({"a": 0.5, "b": 0.5})).unwrap();
        let parents = vec!["P".to_string(), "Q".to_string()];
        let leaf = cpt.leaf_given(&parents, &sample(&[("P", "p1"), ("Q", "q1")]));
        assert_eq!(leaf.len(), 2);
    }

    #[test]
    fn test_explicit_probability_never_uses_skip() {
        let cpt = Cpt::from_value(&json!({
            "deeper": {"p1": {"a": 0.7, "b": 0.3}},
            "skip": {"a": 1.0}
        }))
        .unwrap();
        assert_eq!(cpt.explicit_probability(&["p1"], "a"), 0.7);
        assert_eq!(cpt.explicit_probability(&["p2"], "a"), 0.0);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(Cpt::from_value(&json!([1, 2, 3])).is_err());
        assert!(Cpt::from_value(&json!({"deeper": 4})).is_err());
    }
}
