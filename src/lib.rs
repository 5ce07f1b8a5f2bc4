//! `biome-core` is the unified gene/brain computation graph substrate for
//! BIOME bibites.
//!
//! A single graph of [`Node`]s and [`Connection`]s represents both an
//! agent's inherited traits and its real-time control policy: a node's
//! [`Affinity`] decides whether it is a constant-output gene, a
//! slowly-sampled body-state sensor, or a every-tick behavioural cell.
//! The same mutation and crossover machinery — [`mutation::mutate`],
//! [`crossover::crossover`] — applies uniformly across all three, because
//! there is no separate "genome" data structure to keep in sync with the
//! "brain".
//!
//! # Getting started
//!
//! Build a minimal functional network with [`starter::build_starter_network`],
//! drive it one tick at a time with [`evaluator::process`], and read/write
//! its interface with [`Network::get_output`] and [`Network::write_sensor`]:
//!
//! ```
//! use biome_core::{catalogue::well_known, evaluator, starter};
//!
//! let mut net = starter::build_starter_network(0);
//! net.write_sensor(net.node_id_for_catalogue(well_known::PLANT_ANGLE).unwrap(), 0.5);
//! evaluator::process(&mut net, 0.016);
//! let _rotate = net.get_output(well_known::ROTATE);
//! ```

pub mod activations;
pub mod catalogue;
pub mod connection;
pub mod crossover;
pub mod evaluator;
pub mod hash;
pub mod ids;
pub mod module;
pub mod mutation;
pub mod network;
pub mod node;
pub mod rng;
pub mod starter;

pub use activations::Activation;
pub use connection::Connection;
pub use crossover::{crossover, genetic_distance};
pub use evaluator::process;
pub use ids::{CatalogueId, InnovationId, NetworkId, NodeId};
pub use module::{get_module_input, set_module_output, ModuleInstance};
pub use mutation::{mutate, MutationConfig};
pub use network::{BiomeError, BiomeResult, Network};
pub use node::{Affinity, Node};
pub use rng::BiomeRng;
pub use starter::{build_randomized_starter, build_starter_network, validate_starter, StarterValidationError};

/// Untyped scalar channel write into an instantiated sensor/gene node, or
/// a no-op if `catalogue_id` is not instantiated in `network` (spec.md
/// §6). For sensors this is the host's per-tick input; for genes, prefer
/// [`Network::set_gene_value`], which additionally rejects non-Genetic
/// targets.
pub fn set_sensor(network: &mut Network, catalogue_id: CatalogueId, value: f64) {
    if let Some(node_id) = network.node_id_for_catalogue(catalogue_id) {
        network.write_sensor(node_id, value);
    }
}

/// Untyped scalar channel read (spec.md §6): the current output if
/// instantiated, otherwise the catalogue entry's default.
pub fn get_output(network: &Network, catalogue_id: CatalogueId) -> f64 {
    network.get_output(catalogue_id)
}
