//! Network nodes and per-node sampling.

use rand::Rng;

use crate::bayes::cpt::Cpt;
use crate::bayes::sampler::pick_weighted;
use crate::bayes::Sample;

/// A discrete random variable in a Bayesian network.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent_names: Vec<String>,
    pub(crate) possible_values: Vec<String>,
    pub(crate) cpt: Cpt,
    /// Positions of parent nodes in the owning network's sampling order.
    pub(crate) parents: Vec<usize>,
    /// Positions of child nodes in the owning network's sampling order.
    pub(crate) children: Vec<usize>,
}

impl Node {
    /// Variable name, unique within its network.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent names in the order the CPT dispatches on them.
    pub fn parent_names(&self) -> &[String] {
        &self.parent_names
    }

    /// Every value this variable can take.
    pub fn possible_values(&self) -> &[String] {
        &self.possible_values
    }

    /// Leaf distribution for this node under the given parent assignment.
    pub fn probabilities_given<'a>(&'a self, sample: &Sample) -> &'a [(String, f64)] {
        self.cpt.leaf_given(&self.parent_names, sample)
    }

    /// Sample a value from the full conditional distribution.
    ///
    /// `None` only for a malformed table that resolves to an empty leaf.
    pub(crate) fn sample(&self, sample: &Sample, rng: &mut impl Rng) -> Option<String> {
        let entries = self.probabilities_given(sample);
        let choices: Vec<(&str, f64)> = entries
            .iter()
            .map(|(value, probability)| (value.as_str(), *probability))
            .collect();
        pick_weighted(&choices, rng).map(str::to_owned)
    }

    /// Sample among `allowed` values minus `banned`, keeping each value's
    /// original conditional weight.
    ///
    /// Returns `None` when no surviving value carries probability mass
    /// under the current parent assignment.
    pub(crate) fn sample_restricted(
        &self,
        sample: &Sample,
        allowed: &[String],
        banned: &[String],
        rng: &mut impl Rng,
    ) -> Option<String> {
        let entries = self.probabilities_given(sample);
        let choices: Vec<(&str, f64)> = allowed
            .iter()
            .filter(|value| !banned.iter().any(|b| b == *value))
            .filter_map(|value| {
                entries
                    .iter()
                    .find(|(candidate, _)| candidate == value)
                    .map(|(candidate, probability)| (candidate.as_str(), *probability))
            })
            .collect();
        if choices.is_empty() {
            return None;
        }
        pick_weighted(&choices, rng).map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn coin_node() -> Node {
        Node {
            name: "coin".to_string(),
            parent_names: Vec::new(),
            possible_values: vec!["heads".to_string(), "tails".to_string()],
            cpt: Cpt::from_value(&json!({"heads": 0.5, "tails": 0.5})).unwrap(),
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_sample_stays_within_leaf() {
        let node = coin_node();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let value = node.sample(&Sample::new(), &mut rng).unwrap();
            assert!(value == "heads" || value == "tails");
        }
    }

    #[test]
    fn test_restricted_sample_excludes_banned() {
        let node = coin_node();
        let mut rng = StdRng::seed_from_u64(12);
        let allowed = vec!["heads".to_string(), "tails".to_string()];
        let banned = vec!["heads".to_string()];
        for _ in 0..50 {
            let value = node
                .sample_restricted(&Sample::new(), &allowed, &banned, &mut rng)
                .unwrap();
            assert_eq!(value, "tails");
        }
    }

    #[test]
    fn test_restricted_sample_requires_mass() {
        let node = coin_node();
        let mut rng = StdRng::seed_from_u64(13);
        let allowed = vec!["edge".to_string()];
        assert_eq!(
            node.sample_restricted(&Sample::new(), &allowed, &[], &mut rng),
            None
        );
    }
}
