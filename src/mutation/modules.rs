//! Module-level structural mutations (spec.md §4.6): duplicate, tier
//! upgrade, and modularization. These operate on `Network::modules`
//! rather than on catalogue/hidden nodes directly.

use std::collections::{HashSet, VecDeque};

use crate::ids::NodeId;
use crate::module;
use crate::network::Network;
use crate::rng::BiomeRng;

use super::error::{MutationError, MutationResult};

const CLUSTER_SIZE_MIN: usize = 2;
const CLUSTER_SIZE_MAX: usize = 4;
const DUPLICATE_WEIGHT_JITTER_STD_DEV: f64 = 0.1;

/// Duplicates a random duplication-eligible module instance: fresh node
/// ids, zeroed internal state, purely-internal connections cloned with a
/// small weight perturbation.
pub fn module_duplicate(network: &mut Network, rng: &mut BiomeRng) -> MutationResult<()> {
    let candidates: Vec<usize> = network
        .modules
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            module::definition(m.definition_id)
                .map(|d| d.duplication_eligible)
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return Err(MutationError::NoDuplicableModule);
    }

    let source_idx = candidates[rng.gen_range_usize(0, candidates.len())];
    let definition_id = network.modules[source_idx].definition_id;
    let source_inputs = network.modules[source_idx].input_node_ids.clone();
    let source_outputs = network.modules[source_idx].output_node_ids.clone();
    let source_members: HashSet<NodeId> = source_inputs.iter().chain(source_outputs.iter()).copied().collect();

    let internal_edges: Vec<(NodeId, NodeId, f64)> = network
        .connections()
        .iter()
        .filter(|c| source_members.contains(&c.from_id) && source_members.contains(&c.to_id))
        .map(|c| (c.from_id, c.to_id, c.weight()))
        .collect();

    let new_instance = module::instantiate(network, definition_id);

    let remap = |old: NodeId| -> Option<NodeId> {
        source_inputs
            .iter()
            .position(|&id| id == old)
            .map(|i| new_instance.input_node_ids[i])
            .or_else(|| {
                source_outputs
                    .iter()
                    .position(|&id| id == old)
                    .map(|i| new_instance.output_node_ids[i])
            })
    };

    for (from, to, weight) in internal_edges {
        if let (Some(new_from), Some(new_to)) = (remap(from), remap(to)) {
            let jitter = rng.standard_normal() * DUPLICATE_WEIGHT_JITTER_STD_DEV;
            let _ = network.add_connection(new_from, new_to, weight + jitter, None);
        }
    }

    network.modules.push(new_instance);
    Ok(())
}

/// Upgrades a random module instance below its maximum tier.
pub fn module_tier_upgrade(network: &mut Network, rng: &mut BiomeRng) -> MutationResult<()> {
    let candidates: Vec<usize> = network
        .modules
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            module::definition(m.definition_id)
                .map(|d| m.tier < d.max_tier)
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return Err(MutationError::NoUpgradableModule);
    }

    let idx = candidates[rng.gen_range_usize(0, candidates.len())];
    let mut instance = network.modules.remove(idx);
    module::tier_upgrade(network, &mut instance);
    network.modules.push(instance);
    Ok(())
}

/// Wraps a connected cluster of 2-4 unowned hidden nodes in a new Meta
/// module. The interface is the subset of the cluster with at least one
/// edge crossing the cluster boundary: incoming-boundary nodes become
/// inputs, outgoing-boundary nodes become outputs. Purely a bookkeeping
/// operation — no node or connection is created or rewired.
pub fn modularization(network: &mut Network, rng: &mut BiomeRng) -> MutationResult<()> {
    let owned: HashSet<NodeId> = network
        .modules
        .iter()
        .flat_map(|m| m.input_node_ids.iter().chain(m.output_node_ids.iter()).copied())
        .collect();
    let free: Vec<NodeId> = network
        .hidden_ids()
        .iter()
        .copied()
        .filter(|id| !owned.contains(id))
        .collect();
    if free.is_empty() {
        return Err(MutationError::NoModularizableCluster);
    }

    let seed = free[rng.gen_range_usize(0, free.len())];
    let cluster = grow_cluster(network, seed, &owned);
    if cluster.len() < CLUSTER_SIZE_MIN {
        return Err(MutationError::NoModularizableCluster);
    }

    let cluster_set: HashSet<NodeId> = cluster.iter().copied().collect();
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for conn in network.connections() {
        let from_in = cluster_set.contains(&conn.from_id);
        let to_in = cluster_set.contains(&conn.to_id);
        if !from_in && to_in && !inputs.contains(&conn.to_id) {
            inputs.push(conn.to_id);
        }
        if from_in && !to_in && !outputs.contains(&conn.from_id) {
            outputs.push(conn.from_id);
        }
    }

    let instance = module::instantiate_meta(network, inputs, outputs);
    network.modules.push(instance);
    Ok(())
}

/// Breadth-first walk over hidden-to-hidden connections starting at
/// `seed`, capped at `CLUSTER_SIZE_MAX` nodes, never crossing into an
/// already module-owned node.
fn grow_cluster(network: &Network, seed: NodeId, owned: &HashSet<NodeId>) -> Vec<NodeId> {
    let mut visited = vec![seed];
    let mut queue = VecDeque::from([seed]);

    while let Some(current) = queue.pop_front() {
        if visited.len() >= CLUSTER_SIZE_MAX {
            break;
        }
        for conn in network.connections() {
            let neighbor = if conn.from_id == current && network.is_hidden(conn.to_id) {
                Some(conn.to_id)
            } else if conn.to_id == current && network.is_hidden(conn.from_id) {
                Some(conn.from_id)
            } else {
                None
            };
            if let Some(n) = neighbor {
                if !visited.contains(&n) && !owned.contains(&n) && visited.len() < CLUSTER_SIZE_MAX {
                    visited.push(n);
                    queue.push_back(n);
                }
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::Activation;

    #[test]
    fn module_duplicate_errs_on_singleton_modules() {
        let mut net = Network::new();
        let instance = module::instantiate(&mut net, module::ENERGY);
        net.modules.push(instance);
        // Energy is not duplication-eligible.
        let err = module_duplicate(&mut net, &mut BiomeRng::new(1)).unwrap_err();
        assert_eq!(err, MutationError::NoDuplicableModule);
    }

    #[test]
    fn modularization_requires_minimum_cluster_size() {
        let mut net = Network::new();
        let _h = net.add_hidden(Activation::TanH, 0.0);
        let err = modularization(&mut net, &mut BiomeRng::new(1)).unwrap_err();
        assert_eq!(err, MutationError::NoModularizableCluster);
    }

    #[test]
    fn modularization_wraps_a_connected_pair() {
        let mut net = Network::new();
        let a = net.add_hidden(Activation::TanH, 0.0);
        let b = net.add_hidden(Activation::TanH, 0.0);
        net.add_connection(a, b, 1.0, None).unwrap();
        modularization(&mut net, &mut BiomeRng::new(1)).unwrap();
        assert_eq!(net.modules.len(), 1);
    }
}
