//! Mutation operators (spec.md §4.6). Generalizes the teacher's
//! `Mutations` enum-of-variants-with-chance dispatch into a single
//! `mutate()` driver that rolls every operator's rate independently each
//! call, matching spec.md's framing ("each operator" has its own rate,
//! not a mutually-exclusive choice among operators).

mod basic;
mod config;
mod error;
mod interface;
mod modules;
mod topology;

pub use config::MutationConfig;
pub use error::{MutationError, MutationResult};

use crate::network::Network;
use crate::rng::BiomeRng;

/// Rolls every mutation operator's rate against `rng` and applies the
/// ones that fire, in the order spec.md §4.6 lists them. Every operator
/// is atomic: it either leaves the network in a fully valid state or,
/// internally, aborts without partial effect. Operators that can find
/// "nothing eligible" abort silently rather than surfacing an error —
/// mutation is a best-effort nudge, not a transaction the caller
/// negotiates with.
pub fn mutate(network: &mut Network, rng: &mut BiomeRng, config: &MutationConfig) {
    if rng.gamble(config.weight_shift) {
        basic::weight_shift(network, rng);
    }
    if rng.gamble(config.weight_randomize) {
        basic::weight_randomize(network, rng);
    }
    if rng.gamble(config.connection_toggle) {
        basic::connection_toggle(network, rng);
    }
    if rng.gamble(config.connection_add) {
        topology::connection_add(network, rng);
    }
    if rng.gamble(config.node_add_split) {
        let _ = topology::node_add_split(network, rng);
    }
    if rng.gamble(config.node_remove) {
        let _ = topology::node_remove(network, rng);
    }
    if rng.gamble(config.bias_shift) {
        basic::bias_shift(network, rng, config.mutate_genes);
    }
    if rng.gamble(config.affinity_shift) {
        basic::affinity_shift(network, rng);
    }
    if rng.gamble(config.activation_change) {
        basic::activation_change(network, rng);
    }
    if rng.gamble(config.add_interface_node) {
        let _ = interface::add_interface_node(network, rng);
    }
    if rng.gamble(config.module_duplicate) {
        let _ = modules::module_duplicate(network, rng);
    }
    if rng.gamble(config.module_tier_upgrade) {
        let _ = modules::module_tier_upgrade(network, rng);
    }
    if rng.gamble(config.modularization) {
        let _ = modules::modularization(network, rng);
    }
}
