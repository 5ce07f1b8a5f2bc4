//! `add_interface_node` (spec.md §4.6): lets a lineage evolve new senses
//! by instantiating a previously-absent catalogue entry. Grounded on
//! `Network::add_from_catalogue`'s sparse-instantiation contract
//! (spec.md §4.4, §9 "Sparse instantiation").

use crate::catalogue::CATALOGUE;
use crate::network::Network;
use crate::rng::BiomeRng;

use super::error::{MutationError, MutationResult};

/// Selects a catalogue entry not currently instantiated in `network` and
/// instantiates it at its default bias.
pub fn add_interface_node(network: &mut Network, rng: &mut BiomeRng) -> MutationResult<()> {
    let available: Vec<_> = CATALOGUE
        .all()
        .iter()
        .filter(|entry| network.node_id_for_catalogue(entry.id).is_none())
        .collect();
    if available.is_empty() {
        return Err(MutationError::NoInterfaceNodeAvailable);
    }

    let entry = available[rng.gen_range_usize(0, available.len())];
    network
        .add_from_catalogue(entry.id, None)
        .expect("entry was just confirmed absent from this network");
    Ok(())
}
