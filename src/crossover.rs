//! Crossover and genetic distance (spec.md §4.7). Grounded on the
//! teacher's `Genome::crossover` (dominant/recessive by fitness,
//! matching-gene coin flip, disjoint/excess inherit from dominant) and
//! `compatibility_distance` (excess/disjoint/weight-difference formula),
//! generalized from the teacher's `Genes<T>` hash-set lookup to BIOME's
//! plain node table plus an innovation-keyed connection map.

use std::collections::HashMap;

use crate::ids::InnovationId;
use crate::network::Network;
use crate::rng::BiomeRng;

const DISJOINT_COEFFICIENT: f64 = 1.0;
const WEIGHT_COEFFICIENT: f64 = 0.4;
const SMALL_GENOME_THRESHOLD: usize = 20;

/// Produces a child by copying every node from the fitter parent
/// (`dom`), then for each of `dom`'s connections either keeping it or, if
/// `rec` carries a connection with the same innovation id, picking one of
/// the two by fair coin. Disjoint/excess connections — present in `dom`
/// but with no match in `rec` — always inherit from `dom`, so every
/// connection in the child necessarily references node ids `dom` (and
/// therefore the child) already has.
pub fn crossover(p1: &Network, p2: &Network, rng: &mut BiomeRng) -> Network {
    let (dom, rec) = if p1.fitness >= p2.fitness { (p1, p2) } else { (p2, p1) };

    let mut child = dom.clone();

    let rec_by_innovation: HashMap<InnovationId, usize> = rec
        .connections()
        .iter()
        .enumerate()
        .map(|(i, c)| (c.innovation, i))
        .collect();

    let mut connections = Vec::with_capacity(dom.connections().len());
    for dom_conn in dom.connections() {
        let chosen = match rec_by_innovation.get(&dom_conn.innovation) {
            Some(&rec_idx) if rng.coin_flip() => rec.connections()[rec_idx].clone(),
            _ => dom_conn.clone(),
        };
        connections.push(chosen);
    }
    *child.connections_mut() = connections;

    child.generation = dom.generation.max(rec.generation) + 1;
    child.fitness = 0.0;
    child.raise_innovation_floor(dom.next_innovation().max(rec.next_innovation()));
    child.rebuild_caches();
    child
}

/// Symmetric compatibility distance used for speciation:
/// `d = c2 * D / N + c3 * W̄`, with `D` the count of connections whose
/// innovation appears in exactly one parent, `N` the larger genome's
/// connection count (or 1 below `SMALL_GENOME_THRESHOLD`), and `W̄` the
/// mean absolute weight difference across matching innovations.
pub fn genetic_distance(a: &Network, b: &Network) -> f64 {
    let a_by_innovation: HashMap<InnovationId, f64> =
        a.connections().iter().map(|c| (c.innovation, c.weight())).collect();
    let b_by_innovation: HashMap<InnovationId, f64> =
        b.connections().iter().map(|c| (c.innovation, c.weight())).collect();

    let mut disjoint_and_excess = 0usize;
    let mut weight_diff_sum = 0.0;
    let mut matching = 0usize;

    for (innovation, &weight_a) in &a_by_innovation {
        match b_by_innovation.get(innovation) {
            Some(&weight_b) => {
                weight_diff_sum += (weight_a - weight_b).abs();
                matching += 1;
            }
            None => disjoint_and_excess += 1,
        }
    }
    for innovation in b_by_innovation.keys() {
        if !a_by_innovation.contains_key(innovation) {
            disjoint_and_excess += 1;
        }
    }

    let larger = a.connections().len().max(b.connections().len());
    let n = if larger < SMALL_GENOME_THRESHOLD { 1 } else { larger };
    let mean_weight_diff = if matching > 0 { weight_diff_sum / matching as f64 } else { 0.0 };

    DISJOINT_COEFFICIENT * (disjoint_and_excess as f64) / (n as f64) + WEIGHT_COEFFICIENT * mean_weight_diff
}
