//! Structural mutations that add or remove nodes/connections (spec.md
//! §4.6: connection add, node add/split, node remove). Grounded on the
//! teacher's `add_node`/`add_connection`/`remove_node` trio, generalized
//! from the teacher's fixed feed-forward/recurrent buckets to BIOME's
//! single connection list plus affinity-aware acceptance.

use crate::evaluator::MUTATION_PRIOR;
use crate::ids::NodeId;
use crate::network::Network;
use crate::node::Affinity;
use crate::rng::BiomeRng;

use super::error::{MutationError, MutationResult};

const SPLIT_RETRY_ATTEMPTS: usize = 10;

/// Choose a random source (any affinity) and target (output or hidden,
/// never a sensor). Reject self-loop and existing edges; accept with
/// probability `prior[from.aff, to.aff]`, otherwise abort silently
/// (returns `Ok(())` either way — this operator has no "nothing
/// eligible" failure mode distinct from "the coin came up tails").
pub fn connection_add(network: &mut Network, rng: &mut BiomeRng) {
    let all_ids: Vec<NodeId> = network.nodes().map(|n| n.id).collect();
    if all_ids.len() < 2 {
        return;
    }
    let targets: Vec<NodeId> = network
        .output_ids()
        .iter()
        .chain(network.hidden_ids().iter())
        .copied()
        .collect();
    if targets.is_empty() {
        return;
    }

    let from_id = all_ids[rng.gen_range_usize(0, all_ids.len())];
    let to_id = targets[rng.gen_range_usize(0, targets.len())];

    if from_id == to_id || network.has_edge(from_id, to_id) {
        return;
    }

    let from_aff = network.get(from_id).expect("sampled from live node list").affinity;
    let to_aff = network.get(to_id).expect("sampled from live node list").affinity;

    if !rng.gamble(MUTATION_PRIOR[from_aff.index()][to_aff.index()]) {
        return;
    }

    let weight = rng.uniform(-2.0, 2.0);
    let _ = network.add_connection(from_id, to_id, weight, None);
}

/// Splits an enabled connection `A->B`: disables it, inserts hidden node
/// `H` and connections `A->H` (weight 1.0), `H->B` (weight = original),
/// preserving behavior at the instant of insertion.
pub fn node_add_split(network: &mut Network, rng: &mut BiomeRng) -> MutationResult<()> {
    let enabled_idxs: Vec<usize> = network
        .connections()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.enabled)
        .map(|(i, _)| i)
        .collect();
    if enabled_idxs.is_empty() {
        return Err(MutationError::NoSplittableConnection);
    }

    let mut chosen = None;
    for _ in 0..SPLIT_RETRY_ATTEMPTS {
        let idx = enabled_idxs[rng.gen_range_usize(0, enabled_idxs.len())];
        if network.connections()[idx].enabled {
            chosen = Some(idx);
            break;
        }
    }
    let idx = match chosen {
        Some(idx) => idx,
        None => return Err(MutationError::NoSplittableConnection),
    };

    let (from_id, to_id, original_weight) = {
        let c = &network.connections()[idx];
        (c.from_id, c.to_id, c.weight())
    };
    let from_affinity = network.get(from_id).unwrap().affinity;
    let to_affinity = network.get(to_id).unwrap().affinity;

    network.connections_mut()[idx].enabled = false;

    let hidden_affinity = if from_affinity == Affinity::Genetic && to_affinity == Affinity::Genetic {
        Affinity::Genetic
    } else {
        Affinity::Behavioural
    };
    let pool = crate::activations::Activation::hidden_suitable();
    let activation = pool[rng.gen_range_usize(0, pool.len())];
    let hidden_id = network.add_hidden_with_affinity(hidden_affinity, activation, 0.0);

    network
        .add_connection(from_id, hidden_id, 1.0, None)
        .expect("fresh hidden node cannot already have this edge");
    network
        .add_connection(hidden_id, to_id, original_weight, None)
        .expect("fresh hidden node cannot already have this edge");

    Ok(())
}

/// Picks a random hidden node not owned by any module and deletes it and
/// every connection touching it.
pub fn node_remove(network: &mut Network, rng: &mut BiomeRng) -> MutationResult<()> {
    let removable: Vec<NodeId> = network
        .hidden_ids()
        .iter()
        .copied()
        .filter(|&id| !network.is_module_owned(id))
        .collect();
    if removable.is_empty() {
        return Err(MutationError::NoRemovableHiddenNode);
    }
    let id = removable[rng.gen_range_usize(0, removable.len())];
    network.remove_hidden(id).expect("sampled id is a removable hidden node");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::Activation;

    #[test]
    fn split_disables_original_and_preserves_weight_path() {
        let mut net = Network::new();
        let a = net.add_hidden(Activation::Linear, 0.0);
        let b = net.add_hidden(Activation::Linear, 0.0);
        net.add_connection(a, b, 0.7, None).unwrap();

        node_add_split(&mut net, &mut BiomeRng::new(11)).unwrap();

        assert_eq!(net.connections().len(), 3);
        assert!(!net.connections()[0].enabled);
        let a_to_h = net.connections().iter().find(|c| c.from_id == a && c.enabled).unwrap();
        assert_eq!(a_to_h.weight(), 1.0);
        let h_to_b = net.connections().iter().find(|c| c.to_id == b && c.enabled).unwrap();
        assert_eq!(h_to_b.weight(), 0.7);
    }

    #[test]
    fn node_remove_errs_when_nothing_removable() {
        let mut net = Network::new();
        let err = node_remove(&mut net, &mut BiomeRng::new(1)).unwrap_err();
        assert_eq!(err, MutationError::NoRemovableHiddenNode);
    }

    #[test]
    fn connection_add_never_creates_self_loop_or_duplicate() {
        let mut net = Network::new();
        let a = net.add_hidden(Activation::Linear, 0.0);
        let b = net.add_hidden(Activation::Linear, 0.0);
        let mut rng = BiomeRng::new(5);
        for _ in 0..200 {
            connection_add(&mut net, &mut rng);
        }
        for c in net.connections() {
            assert_ne!(c.from_id, c.to_id);
        }
        let _ = (a, b);
    }
}
