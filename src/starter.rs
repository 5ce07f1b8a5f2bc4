//! Starter network construction and validation (spec.md §6). Grounded on
//! the teacher's `GenomeContext::initialized_genome`, which builds a
//! minimal, fully-wired genome from a fixed input/output shape; BIOME's
//! starter instead instantiates specific catalogue entries and wires
//! three fixed reflex connections, since the catalogue (not a generic
//! input/output count) defines what "minimal but functional" means here.

use crate::catalogue::{well_known, Category, CATALOGUE};
use crate::ids::NodeId;
use crate::network::Network;
use crate::node::Affinity;
use crate::rng::BiomeRng;

/// Builds a network with every gene-class node at default bias, the four
/// sensor nodes a minimal reflex needs (`EnergyRatio`, `Fullness`,
/// `PlantCloseness`, `PlantAngle`), every output-class node, and three
/// seed connections wiring plant bearing/proximity and fullness straight
/// to movement and digestion.
///
/// `seed` is accepted for API symmetry with `build_randomized_starter`
/// but unused here: the unrandomized starter is deterministic by
/// construction.
pub fn build_starter_network(seed: u64) -> Network {
    let _ = seed;
    let mut net = Network::new();

    for entry in CATALOGUE.by_category(Category::Gene) {
        net.add_from_catalogue(entry.id, None).expect("gene catalogue entries are unique");
    }

    for id in [
        well_known::ENERGY_RATIO,
        well_known::FULLNESS,
        well_known::PLANT_CLOSENESS,
        well_known::PLANT_ANGLE,
    ] {
        net.add_from_catalogue(id, None).expect("starter sensor entries are unique");
    }

    for entry in CATALOGUE.by_category(Category::Output) {
        net.add_from_catalogue(entry.id, None).expect("output catalogue entries are unique");
    }

    let plant_angle = net.node_id_for_catalogue(well_known::PLANT_ANGLE).unwrap();
    let plant_closeness = net.node_id_for_catalogue(well_known::PLANT_CLOSENESS).unwrap();
    let fullness = net.node_id_for_catalogue(well_known::FULLNESS).unwrap();
    let rotate = net.node_id_for_catalogue(well_known::ROTATE).unwrap();
    let accelerate = net.node_id_for_catalogue(well_known::ACCELERATE).unwrap();
    let digestion = net.node_id_for_catalogue(well_known::DIGESTION).unwrap();

    net.add_connection(plant_angle, rotate, 1.0, None).expect("fresh seed connection");
    net.add_connection(plant_closeness, accelerate, -1.0, None).expect("fresh seed connection");
    net.add_connection(fullness, digestion, 1.0, None).expect("fresh seed connection");

    net
}

/// Like `build_starter_network`, but every gene's bias is jittered by
/// `bias + U(-variance, +variance) * |bias + 0.1|`, then clamped per
/// per-gene rules: colors and diet to `[0, 1]`; radii/periods to `≥ 0.1`;
/// `SizeRatio`/`MetabolismSpeed` to `≥ 0.1`.
pub fn build_randomized_starter(rng: &mut BiomeRng, variance: f64) -> Network {
    let mut net = build_starter_network(0);

    let gene_ids: Vec<(crate::ids::CatalogueId, NodeId)> = CATALOGUE
        .by_category(Category::Gene)
        .map(|entry| (entry.id, net.node_id_for_catalogue(entry.id).unwrap()))
        .collect();

    for (catalogue_id, node_id) in gene_ids {
        let bias = net.get(node_id).unwrap().bias;
        let jittered = bias + rng.uniform(-variance, variance) * (bias + 0.1).abs();
        let clamped = clamp_gene_value(catalogue_id, jittered);
        net.set_gene_value(catalogue_id, clamped).expect("gene node is Genetic by construction");
    }

    net
}

fn is_unit_interval_gene(catalogue_id: crate::ids::CatalogueId) -> bool {
    catalogue_id == well_known::DIET
        || CATALOGUE
            .by_id(catalogue_id)
            .map(|e| matches!(e.name, "ColorR" | "ColorG" | "ColorB"))
            .unwrap_or(false)
}

fn is_positive_floor_gene(catalogue_id: crate::ids::CatalogueId) -> bool {
    CATALOGUE
        .by_id(catalogue_id)
        .map(|e| {
            e.name.ends_with("Radius")
                || e.name.ends_with("Period")
                || e.name.ends_with("Angle")
                || catalogue_id == well_known::SIZE_RATIO
                || catalogue_id == well_known::METABOLISM_SPEED
        })
        .unwrap_or(false)
}

fn clamp_gene_value(catalogue_id: crate::ids::CatalogueId, value: f64) -> f64 {
    if is_unit_interval_gene(catalogue_id) {
        value.clamp(0.0, 1.0)
    } else if is_positive_floor_gene(catalogue_id) {
        value.max(0.1)
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarterValidationError {
    MissingEntry(crate::ids::CatalogueId),
}

/// Confirms essential genes (`SizeRatio`, `MetabolismSpeed`, `Diet`) and
/// at least one movement output (`Accelerate`) are present.
pub fn validate_starter(network: &Network) -> Result<(), StarterValidationError> {
    for id in [well_known::SIZE_RATIO, well_known::METABOLISM_SPEED, well_known::DIET, well_known::ACCELERATE] {
        if network.node_id_for_catalogue(id).is_none() {
            return Err(StarterValidationError::MissingEntry(id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_has_three_seed_connections() {
        let net = build_starter_network(0);
        assert_eq!(net.connections().len(), 3);
    }

    #[test]
    fn starter_contains_every_gene_and_output() {
        let net = build_starter_network(0);
        let gene_count = CATALOGUE.by_category(Category::Gene).count();
        let output_count = CATALOGUE.by_category(Category::Output).count();
        assert_eq!(net.gene_ids().len(), gene_count);
        assert_eq!(net.output_ids().len(), output_count);
        assert_eq!(net.sensor_ids().len(), 4);
    }

    #[test]
    fn starter_validates_successfully() {
        let net = build_starter_network(0);
        assert!(validate_starter(&net).is_ok());
    }

    #[test]
    fn empty_network_fails_validation_with_missing_entry() {
        let net = Network::new();
        let err = validate_starter(&net).unwrap_err();
        assert_eq!(err, StarterValidationError::MissingEntry(well_known::SIZE_RATIO));
    }

    #[test]
    fn randomized_starter_keeps_genetic_invariant() {
        let mut rng = BiomeRng::new(42);
        let net = build_randomized_starter(&mut rng, 0.2);
        for node in net.nodes() {
            if node.affinity == Affinity::Genetic {
                assert_eq!(node.output, node.bias);
            }
        }
    }

    #[test]
    fn randomized_starter_respects_unit_interval_genes() {
        let mut rng = BiomeRng::new(7);
        let net = build_randomized_starter(&mut rng, 5.0);
        let diet = net.node_id_for_catalogue(well_known::DIET).unwrap();
        let value = net.get(diet).unwrap().bias;
        assert!((0.0..=1.0).contains(&value));
    }
}
