//! Discrete Bayesian networks with restricted joint sampling.
//!
//! A network owns its nodes in a topological sampling order, so every
//! node's parents are bound before the node itself is drawn. Joint sampling
//! under per-variable value restrictions backtracks: a locally legal choice
//! can strand a later variable, in which case the choice is banned at its
//! depth and redrawn.

pub mod cpt;
pub mod node;
mod sampler;

use std::collections::HashMap;

use rand::Rng;
use serde::Deserialize;

use crate::archive::read_single_entry;
use crate::error::{Error, Result};

pub use cpt::Cpt;
pub use node::Node;

/// A (possibly partial) assignment of values to network variables.
pub type Sample = HashMap<String, String>;

/// Per-variable allowed-value lists for joint sampling.
pub type ValueRestrictions = HashMap<String, Vec<String>>;

#[derive(Deserialize)]
struct NetworkDefinition {
    nodes: Vec<NodeDefinition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeDefinition {
    name: String,
    #[serde(default)]
    parent_names: Vec<String>,
    #[serde(default)]
    possible_values: Vec<String>,
    conditional_probabilities: serde_json::Value,
}

/// A discrete Bayesian network.
#[derive(Debug, Clone)]
pub struct BayesianNetwork {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl BayesianNetwork {
    /// Decode a network from a single-entry ZIP archive.
    pub fn from_zip(blob: &[u8]) -> Result<Self> {
        Self::from_json(&read_single_entry(blob)?)
    }

    /// Decode a network from its JSON definition.
    ///
    /// Nodes keep their document order, which must already be a valid
    /// sampling order. Every parent reference must resolve within the
    /// document.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let definition: NetworkDefinition = serde_json::from_slice(data)?;
        if definition.nodes.is_empty() {
            return Err(Error::definition("network has no nodes"));
        }

        let mut index = HashMap::with_capacity(definition.nodes.len());
        for (position, def) in definition.nodes.iter().enumerate() {
            if index.insert(def.name.clone(), position).is_some() {
                return Err(Error::definition(format!("duplicate node `{}`", def.name)));
            }
        }

        let mut nodes = Vec::with_capacity(definition.nodes.len());
        for def in definition.nodes {
            let cpt = Cpt::from_value(&def.conditional_probabilities)?;
            let parents = def
                .parent_names
                .iter()
                .map(|parent| {
                    index.get(parent).copied().ok_or_else(|| {
                        Error::definition(format!(
                            "node `{}` references unknown parent `{parent}`",
                            def.name
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            nodes.push(Node {
                name: def.name,
                parent_names: def.parent_names,
                possible_values: def.possible_values,
                cpt,
                parents,
                children: Vec::new(),
            });
        }

        // Second pass: child links, now that every position is known.
        for position in 0..nodes.len() {
            let parents = nodes[position].parents.clone();
            for parent in parents {
                nodes[parent].children.push(position);
            }
        }

        Ok(Self { nodes, index })
    }

    /// Nodes in sampling order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&position| &self.nodes[position])
    }

    /// Names of `name`'s parents, in CPT dispatch order.
    pub fn parents_of(&self, name: &str) -> Option<Vec<&str>> {
        let node = self.node(name)?;
        Some(
            node.parents
                .iter()
                .map(|&position| self.nodes[position].name())
                .collect(),
        )
    }

    /// Names of the nodes that condition on `name`.
    pub fn children_of(&self, name: &str) -> Option<Vec<&str>> {
        let node = self.node(name)?;
        Some(
            node.children
                .iter()
                .map(|&position| self.nodes[position].name())
                .collect(),
        )
    }

    /// Draw a complete sample, keeping any values already bound in `seed`.
    pub fn generate_sample(&self, seed: &Sample, rng: &mut impl Rng) -> Sample {
        let mut sample = seed.clone();
        for node in &self.nodes {
            if !sample.contains_key(node.name()) {
                if let Some(value) = node.sample(&sample, rng) {
                    sample.insert(node.name().to_owned(), value);
                }
            }
        }
        sample
    }

    /// Draw a complete sample in which every restricted variable takes a
    /// value from its restriction list.
    ///
    /// `None` when no joint assignment satisfies the restrictions.
    pub fn generate_consistent_sample(
        &self,
        restrictions: &ValueRestrictions,
        rng: &mut impl Rng,
    ) -> Option<Sample> {
        let mut sample = Sample::new();
        if self.sample_consistent_from(0, &mut sample, restrictions, rng) {
            Some(sample)
        } else {
            None
        }
    }

    /// Depth-first search over the sampling order. At each depth, values
    /// that stranded a deeper variable are banned before redrawing; the
    /// banned set is bounded by the node's value count, so the search
    /// terminates.
    fn sample_consistent_from(
        &self,
        depth: usize,
        sample: &mut Sample,
        restrictions: &ValueRestrictions,
        rng: &mut impl Rng,
    ) -> bool {
        if depth == self.nodes.len() {
            return true;
        }
        let node = &self.nodes[depth];
        let allowed = restrictions
            .get(node.name())
            .map(Vec::as_slice)
            .unwrap_or_else(|| node.possible_values());
        let mut banned: Vec<String> = Vec::new();
        loop {
            let Some(value) = node.sample_restricted(sample, allowed, &banned, rng) else {
                return false;
            };
            sample.insert(node.name().to_owned(), value.clone());
            if self.sample_consistent_from(depth + 1, sample, restrictions, rng) {
                return true;
            }
            sample.remove(node.name());
            banned.push(value);
        }
    }

    /// Probability of `value` at `name` when `evidence` explicitly binds
    /// every parent. Unbound parents and paths absent from the table give 0.
    pub fn marginal(&self, name: &str, value: &str, evidence: &Sample) -> f64 {
        let Some(node) = self.node(name) else {
            return 0.0;
        };
        let mut parent_values = Vec::with_capacity(node.parents.len());
        for &parent in &node.parents {
            match evidence.get(self.nodes[parent].name()) {
                Some(bound) => parent_values.push(bound.as_str()),
                None => return 0.0,
            }
        }
        node.cpt.explicit_probability(&parent_values, value)
    }

    /// Marginal of every possible value of `name` under `evidence`.
    pub fn distribution(&self, name: &str, evidence: &Sample) -> HashMap<String, f64> {
        let Some(node) = self.node(name) else {
            return HashMap::new();
        };
        node.possible_values()
            .iter()
            .map(|value| (value.clone(), self.marginal(name, value, evidence)))
            .collect()
    }
}
