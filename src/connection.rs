use serde::{Deserialize, Serialize};

use crate::ids::{InnovationId, NodeId};

pub const WEIGHT_MIN: f64 = -5.0;
pub const WEIGHT_MAX: f64 = 5.0;

/// A directed, weighted edge between two nodes, carrying a stable
/// `innovation` id for crossover homology. Grounded on the teacher's
/// `Connection` (`input`, `output`, `weight`), generalized with the
/// `enabled`/`innovation` fields spec.md §3 adds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub from_id: NodeId,
    pub to_id: NodeId,
    weight: f64,
    pub enabled: bool,
    pub innovation: InnovationId,
}

impl Connection {
    pub fn new(from_id: NodeId, to_id: NodeId, weight: f64, innovation: InnovationId) -> Self {
        debug_assert_ne!(from_id, to_id, "connections must not be self-loops");
        Connection {
            from_id,
            to_id,
            weight: weight.clamp(WEIGHT_MIN, WEIGHT_MAX),
            enabled: true,
            innovation,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Sets the weight, clamping to `[-5, +5]` per spec.md §3.
    pub fn set_weight(&mut self, weight: f64) {
        debug_assert!(weight.is_finite());
        self.weight = weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
    }

    pub fn nudge_weight(&mut self, delta: f64) {
        self.set_weight(self.weight + delta);
    }

    pub fn key(&self) -> (NodeId, NodeId) {
        (self.from_id, self.to_id)
    }
}
