//! The mutation operators that touch one existing gene/node/connection at
//! a time, independently across the collection (spec.md §4.6: weight
//! shift, weight randomize, connection toggle, bias shift, affinity
//! shift, activation change). Grouped together the way the teacher groups
//! its per-connection `change_weights` loop.

use crate::activations::Activation;
use crate::network::Network;
use crate::node::Affinity;
use crate::rng::BiomeRng;

const WEIGHT_SHIFT_STD_DEV: f64 = 0.5;
const BIAS_SHIFT_STD_DEV: f64 = 0.3;
const BIAS_MIN: f64 = -3.0;
const BIAS_MAX: f64 = 3.0;

/// For each connection independently, `weight += N(0,1) * 0.5`, clamped.
pub fn weight_shift(network: &mut Network, rng: &mut BiomeRng) {
    for conn in network.connections_mut() {
        let delta = rng.standard_normal() * WEIGHT_SHIFT_STD_DEV;
        conn.nudge_weight(delta);
    }
}

/// For each connection independently, replace weight with `U(-2, +2)`.
pub fn weight_randomize(network: &mut Network, rng: &mut BiomeRng) {
    for conn in network.connections_mut() {
        let weight = rng.uniform(-2.0, 2.0);
        conn.set_weight(weight);
    }
}

/// Per-connection, flip `enabled`.
pub fn connection_toggle(network: &mut Network, _rng: &mut BiomeRng) {
    for conn in network.connections_mut() {
        conn.enabled = !conn.enabled;
    }
}

/// For each non-input node (outputs, hidden, and genes when
/// `mutate_genes` is set), `bias += N(0,1) * 0.3`, clamped to `[-3, 3]`.
/// For a Genetic node this doubles as jittering the gene value, since
/// bias IS the gene value.
pub fn bias_shift(network: &mut Network, rng: &mut BiomeRng, mutate_genes: bool) {
    let targets: Vec<_> = network
        .nodes()
        .filter(|n| match n.affinity {
            Affinity::Genetic => mutate_genes,
            _ => true,
        })
        .map(|n| n.id)
        .collect();

    for id in targets {
        let delta = rng.standard_normal() * BIAS_SHIFT_STD_DEV;
        if let Some(node) = network.get_mut(id) {
            let new_bias = (node.bias + delta).clamp(BIAS_MIN, BIAS_MAX);
            if node.is_genetic() {
                node.set_gene_value(new_bias);
            } else {
                node.bias = new_bias;
            }
        }
    }
}

/// Hidden nodes only, excluding module-owned interface nodes: step
/// affinity up or down by one level. A module's declared input/output
/// slots have a fixed affinity (spec.md §4.8); shifting it out from under
/// the module would silently corrupt its interface, the same reasoning
/// `node_remove` already applies.
pub fn affinity_shift(network: &mut Network, rng: &mut BiomeRng) {
    let hidden: Vec<_> = network
        .hidden_ids()
        .iter()
        .copied()
        .filter(|&id| !network.is_module_owned(id))
        .collect();
    for id in hidden {
        if let Some(node) = network.get_mut(id) {
            node.affinity = if rng.coin_flip() {
                node.affinity.step_up()
            } else {
                node.affinity.step_down()
            };
        }
    }
}

/// Hidden nodes only, excluding module-owned interface nodes: pick a new
/// activation from the hidden-suitable subset. A module's declared slots
/// expect a fixed activation (spec.md §4.8), so they're protected the
/// same way `node_remove` protects them from deletion.
pub fn activation_change(network: &mut Network, rng: &mut BiomeRng) {
    let pool = Activation::hidden_suitable();
    let hidden: Vec<_> = network
        .hidden_ids()
        .iter()
        .copied()
        .filter(|&id| !network.is_module_owned(id))
        .collect();
    for id in hidden {
        let idx = rng.gen_range_usize(0, pool.len());
        if let Some(node) = network.get_mut(id) {
            node.activation = pool[idx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::well_known;

    fn wired_network() -> Network {
        let mut net = Network::new();
        let a = net.add_from_catalogue(well_known::PLANT_ANGLE, None).unwrap();
        let b = net.add_from_catalogue(well_known::ROTATE, None).unwrap();
        net.add_connection(a, b, 1.0, None).unwrap();
        net
    }

    #[test]
    fn weight_shift_stays_within_bounds() {
        let mut net = wired_network();
        let mut rng = BiomeRng::new(1);
        for _ in 0..50 {
            weight_shift(&mut net, &mut rng);
        }
        for c in net.connections() {
            assert!(c.weight() >= -5.0 && c.weight() <= 5.0);
        }
    }

    #[test]
    fn connection_toggle_flips_enabled() {
        let mut net = wired_network();
        let was_enabled = net.connections()[0].enabled;
        connection_toggle(&mut net, &mut BiomeRng::new(2));
        assert_eq!(net.connections()[0].enabled, !was_enabled);
    }

    #[test]
    fn bias_shift_never_touches_genetic_output_invariant() {
        let mut net = wired_network();
        bias_shift(&mut net, &mut BiomeRng::new(3), false);
        // PLANT_ANGLE is a sensor, not genetic, so this just checks no panic
        // and that genetic invariant (output == bias) would still hold for
        // any gene that had been present.
        for node in net.nodes() {
            if node.is_genetic() {
                assert_eq!(node.output, node.bias);
            }
        }
    }

    #[test]
    fn affinity_shift_leaves_module_owned_nodes_untouched() {
        let mut net = Network::new();
        let instance = crate::module::instantiate(&mut net, crate::module::CLOCK);
        net.modules.push(instance.clone());
        let before: Vec<_> = instance
            .input_node_ids
            .iter()
            .chain(instance.output_node_ids.iter())
            .map(|&id| (id, net.get(id).unwrap().affinity))
            .collect();

        for _ in 0..20 {
            affinity_shift(&mut net, &mut BiomeRng::new(4));
        }

        for (id, affinity) in before {
            assert_eq!(net.get(id).unwrap().affinity, affinity);
        }
    }

    #[test]
    fn activation_change_leaves_module_owned_nodes_untouched() {
        let mut net = Network::new();
        let instance = crate::module::instantiate(&mut net, crate::module::CLOCK);
        net.modules.push(instance.clone());
        let before: Vec<_> = instance
            .input_node_ids
            .iter()
            .chain(instance.output_node_ids.iter())
            .map(|&id| (id, net.get(id).unwrap().activation))
            .collect();

        for _ in 0..20 {
            activation_change(&mut net, &mut BiomeRng::new(5));
        }

        for (id, activation) in before {
            assert_eq!(net.get(id).unwrap().activation, activation);
        }
    }
}
