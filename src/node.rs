use serde::{Deserialize, Serialize};

use crate::activations::Activation;
use crate::ids::{CatalogueId, NodeId};

/// A node's update-rate class and connection-effectiveness class
/// (spec.md §3, §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affinity {
    Genetic,
    Biological,
    Behavioural,
}

impl Affinity {
    /// Row/column index into the 3x3 effectiveness/prior matrices.
    pub(crate) fn index(self) -> usize {
        match self {
            Affinity::Genetic => 0,
            Affinity::Biological => 1,
            Affinity::Behavioural => 2,
        }
    }

    /// One affinity level up (Genetic -> Biological -> Behavioural), saturating.
    pub fn step_up(self) -> Self {
        match self {
            Affinity::Genetic => Affinity::Biological,
            Affinity::Biological | Affinity::Behavioural => Affinity::Behavioural,
        }
    }

    /// One affinity level down, saturating.
    pub fn step_down(self) -> Self {
        match self {
            Affinity::Behavioural => Affinity::Biological,
            Affinity::Biological | Affinity::Genetic => Affinity::Genetic,
        }
    }
}

/// The fundamental unit of the substrate: a gene cell, a sensor/output
/// interface cell, or an evolved hidden cell — all the same struct, per
/// spec.md §9's "genes as nodes" design note. Mirrors the teacher's `Node`
/// (`id`, `activation`, plus bookkeeping) with the fields spec.md §3 adds:
/// affinity, bias-as-gene-value, and the per-tick propagation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub catalogue_id: Option<CatalogueId>,
    pub affinity: Affinity,
    pub activation: Activation,
    pub bias: f64,
    #[serde(skip)]
    pub accumulator: f64,
    pub output: f64,
    pub previous_output: f64,
    pub last_update_tick: u64,
}

impl Node {
    /// Constructs a node pre-populated from a catalogue entry's defaults.
    /// `override_bias` lets `Network::add_from_catalogue` honor an explicit
    /// gene value instead of the catalogue default.
    pub fn from_catalogue(
        id: NodeId,
        catalogue_id: CatalogueId,
        affinity: Affinity,
        activation: Activation,
        bias: f64,
    ) -> Self {
        // Gene output is defined to equal bias at all times (spec.md §3).
        let output = if matches!(affinity, Affinity::Genetic) {
            bias
        } else {
            // Sensors/outputs start at the value they would produce from a
            // zero accumulator, so an unwired output still yields a sane
            // default via `activation.apply` rather than a bare zero.
            crate::activations::apply(activation, 0.0, bias, 0.0, 0.0)
        };

        Node {
            id,
            catalogue_id: Some(catalogue_id),
            affinity,
            activation,
            bias,
            accumulator: 0.0,
            output,
            previous_output: output,
            last_update_tick: 0,
        }
    }

    /// Constructs an evolved hidden node: Behavioural affinity (or Genetic,
    /// for a split between two Genetic endpoints), `catalogue_id = None`.
    pub fn hidden(id: NodeId, affinity: Affinity, activation: Activation, bias: f64) -> Self {
        Node {
            id,
            catalogue_id: None,
            affinity,
            activation,
            bias,
            accumulator: 0.0,
            output: bias,
            previous_output: bias,
            last_update_tick: 0,
        }
    }

    pub fn is_genetic(&self) -> bool {
        matches!(self.affinity, Affinity::Genetic)
    }

    /// Writes both bias and output for a Genetic node; panics if called on
    /// a non-Genetic node, as that would violate spec.md §3's invariant
    /// that bias IS the gene value. Callers go through
    /// `Network::set_gene_value`, which enforces this via `BiomeError`.
    pub(crate) fn set_gene_value(&mut self, value: f64) {
        debug_assert!(self.is_genetic());
        self.bias = value;
        self.output = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::Activation;

    #[test]
    fn genetic_node_output_equals_bias() {
        let node = Node::from_catalogue(NodeId(0), CatalogueId(0), Affinity::Genetic, Activation::Identity, 0.3);
        assert_eq!(node.output, 0.3);
    }

    #[test]
    fn affinity_step_saturates() {
        assert_eq!(Affinity::Genetic.step_down(), Affinity::Genetic);
        assert_eq!(Affinity::Behavioural.step_up(), Affinity::Behavioural);
        assert_eq!(Affinity::Genetic.step_up(), Affinity::Biological);
    }
}
