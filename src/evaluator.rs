//! Per-tick processing (spec.md §4.5). Generalizes the teacher's
//! recurrent/feed-forward `Developer`-style execution into a single
//! uniform two-phase propagate/activate pass that needs no topological
//! sort: cycles resolve themselves because every destination reads its
//! sources' *previous* tick output, never the current one.

use std::collections::HashSet;

use tracing::debug;

use crate::ids::NodeId;
use crate::module::{self, ModuleKind};
use crate::network::Network;
use crate::node::Affinity;

/// Effectiveness[from.affinity][to.affinity] — spec.md §4.2.
const EFFECTIVENESS: [[f64; 3]; 3] = [
    [1.00, 0.80, 0.30],
    [0.05, 1.00, 1.00],
    [0.01, 0.30, 1.00],
];

/// Relative acceptance probability for a newly proposed connection of
/// this directionality (spec.md §4.2, consumed by the mutation layer).
pub const MUTATION_PRIOR: [[f64; 3]; 3] = [
    [0.50, 1.00, 0.80],
    [0.05, 0.70, 1.00],
    [0.01, 0.20, 1.00],
];

/// Ticks between Biological-affinity updates (spec.md §4.2: "the one
/// tunable ... exposed as a configuration constant but not per-node").
pub const BIOLOGICAL_UPDATE_INTERVAL: u64 = 12;

pub fn effectiveness(from: Affinity, to: Affinity) -> f64 {
    EFFECTIVENESS[from.index()][to.index()]
}

/// Whether a node of this affinity updates on the current tick.
pub fn should_update(affinity: Affinity, last_update_tick: u64, current_tick: u64) -> bool {
    match affinity {
        Affinity::Genetic => false,
        Affinity::Biological => current_tick.saturating_sub(last_update_tick) >= BIOLOGICAL_UPDATE_INTERVAL,
        Affinity::Behavioural => true,
    }
}

/// Advances `network` by one tick of length `dt` seconds. Runs Functional
/// module `process` callbacks between propagation and the final activate
/// pass, after their output-facing sensor nodes have this tick's inputs
/// but before downstream nodes consume them — matching how the Clock's
/// `Tic` must be visible to the *same* tick's activate pass (spec.md §8's
/// clock scenario reads `Tic` pulses counted across ticks, not delayed).
pub fn process(network: &mut Network, dt: f64) {
    network.ensure_caches();
    network.current_tick += 1;
    let current_tick = network.current_tick;

    let due: Vec<NodeId> = network
        .nodes()
        .filter(|n| should_update(n.affinity, n.last_update_tick, current_tick))
        .map(|n| n.id)
        .collect();

    for &id in &due {
        if let Some(node) = network.get_mut(id) {
            node.accumulator = 0.0;
        }
    }

    for conn in network.connections() {
        if !conn.enabled {
            continue;
        }
        if !due.contains(&conn.to_id) {
            continue;
        }
        let (from_output, from_affinity) = match network.get(conn.from_id) {
            Some(n) => (n.output, n.affinity),
            None => {
                debug!(from = ?conn.from_id, to = ?conn.to_id, "dangling connection skipped");
                continue;
            }
        };
        let to_affinity = match network.get(conn.to_id) {
            Some(n) => n.affinity,
            None => {
                debug!(from = ?conn.from_id, to = ?conn.to_id, "dangling connection skipped");
                continue;
            }
        };
        let eff = conn.weight() * effectiveness(from_affinity, to_affinity);
        if let Some(to_node) = network.get_mut(conn.to_id) {
            to_node.accumulator += from_output * eff;
        }
    }

    run_functional_modules(network, dt);

    // Functional modules (e.g. the Clock) write their output slots directly
    // via `write_sensor` inside `run_functional_modules`, above. Those nodes
    // are otherwise ordinary Behavioural hidden nodes and would be `due`
    // here too; recomputing them from `accumulator`/`bias` would immediately
    // stomp the value the module just wrote, so they're excluded the same
    // way a host-written sensor is never fed back through activation.
    let functional_outputs = functional_module_outputs(network);

    for &id in &due {
        if functional_outputs.contains(&id) {
            continue;
        }
        if let Some(node) = network.get_mut(id) {
            let previous = node.output;
            node.previous_output = previous;
            node.output = crate::activations::apply(node.activation, node.accumulator, node.bias, previous, dt);
            node.last_update_tick = current_tick;
        }
    }
}

fn functional_module_outputs(network: &Network) -> HashSet<NodeId> {
    network
        .modules
        .iter()
        .filter(|instance| {
            module::definition(instance.definition_id)
                .map_or(false, |def| def.kind == ModuleKind::Functional)
        })
        .flat_map(|instance| instance.output_node_ids.iter().copied())
        .collect()
}

fn run_functional_modules(network: &mut Network, dt: f64) {
    let mut instances = std::mem::take(&mut network.modules);
    for instance in instances.iter_mut() {
        module::process(instance, network, dt);
    }
    network.modules = instances;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::Activation;
    use crate::catalogue::well_known;
    use crate::network::Network;
    use crate::node::Affinity;

    #[test]
    fn one_tick_delay_through_a_cycle() {
        let mut net = Network::new();
        let a = net.add_hidden(Activation::Identity, 1.0);
        let b = net.add_hidden(Activation::Identity, 0.0);
        net.add_connection(a, b, 1.0, None).unwrap();
        net.add_connection(b, a, 1.0, None).unwrap();

        process(&mut net, 1.0);
        // b sees a's tick-0 output (1.0, its bias); a sees b's tick-0 output (0.0).
        assert_eq!(net.get(b).unwrap().output, 1.0);
        assert_eq!(net.get(a).unwrap().output, 1.0);
    }

    #[test]
    fn genetic_node_never_updates() {
        let mut net = Network::new();
        net.add_from_catalogue(well_known::SIZE_RATIO, Some(0.7)).unwrap();
        process(&mut net, 0.016);
        let gene_id = net.node_id_for_catalogue(well_known::SIZE_RATIO).unwrap();
        let gene = net.get(gene_id).unwrap();
        assert_eq!(gene.affinity, Affinity::Genetic);
        assert_eq!(gene.output, 0.7);
        assert_eq!(gene.last_update_tick, 0);
    }

    #[test]
    fn biological_sensor_updates_every_twelve_ticks() {
        let mut net = Network::new();
        net.add_from_catalogue(well_known::ENERGY_RATIO, None).unwrap();
        let id = net.node_id_for_catalogue(well_known::ENERGY_RATIO).unwrap();
        for tick in 1..=24u64 {
            process(&mut net, 1.0);
            let updated_last = net.get(id).unwrap().last_update_tick;
            if tick == 12 || tick == 24 {
                assert_eq!(updated_last, tick);
            }
        }
    }

    #[test]
    fn affinity_scaling_blocks_genetic_destination() {
        let mut net = Network::new();
        let src = net.add_hidden_with_affinity(Affinity::Behavioural, Activation::Linear, 1.0);
        let dst = net.add_hidden_with_affinity(Affinity::Genetic, Activation::Identity, 0.3);
        net.add_connection(src, dst, 1.0, None).unwrap();
        process(&mut net, 0.016);
        assert_eq!(net.get(dst).unwrap().output, 0.3);
    }

    #[test]
    fn connection_sum_is_commutative_across_two_sources() {
        let mut net = Network::new();
        let a = net.add_hidden(Activation::Identity, 1.0);
        let b = net.add_hidden(Activation::Identity, 2.0);
        let dst = net.add_hidden(Activation::Linear, 0.0);
        net.add_connection(a, dst, 1.0, None).unwrap();
        net.add_connection(b, dst, 1.0, None).unwrap();
        process(&mut net, 1.0);
        assert_eq!(net.get(dst).unwrap().output, 3.0);
    }
}
