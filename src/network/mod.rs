//! The sparse graph container (spec.md §3, §4.4). Generalizes the
//! teacher's `Genome` (`inputs`/`hidden`/`outputs`/`feed_forward`/
//! `recurrent` — five fixed gene-set buckets) into the catalogue-indexed,
//! affinity-indexed scheme BIOME needs: a single node table plus caches
//! keyed by catalogue id and by affinity class, and one insertion-ordered
//! connection list instead of two fixed feed-forward/recurrent buckets
//! (BIOME has no feed-forward/recurrent distinction — the evaluator's
//! two-phase propagate/activate split per spec.md §4.5 handles cycles
//! uniformly).

pub mod error;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::activations::Activation;
use crate::catalogue::{Category, CATALOGUE};
use crate::connection::Connection;
use crate::hash::GeneHasher;
use crate::ids::{CatalogueId, InnovationId, NetworkId, NodeId};
use crate::module::ModuleInstance;
use crate::node::{Affinity, Node};

pub use error::{BiomeError, BiomeResult};

fn dirty_true() -> bool {
    true
}

/// The full graph for one agent: nodes, connections, indices, counters
/// (spec.md glossary). Node and connection insertion are O(1): the
/// catalogue/affinity/edge caches are updated incrementally by every
/// mutator below rather than recomputed from scratch, except
/// `remove_hidden` (rare, mutation-triggered) and deserialization, which
/// fall back to a full `rebuild_caches()` pass — both are documented as
/// acceptable by spec.md §4.4.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    nodes: HashMap<NodeId, Node>,
    connections: Vec<Connection>,

    catalogue_index: HashMap<CatalogueId, NodeId, GeneHasher>,
    #[serde(skip, default)]
    connections_by_dest: HashMap<NodeId, Vec<usize>, GeneHasher>,
    #[serde(skip, default)]
    edge_set: HashSet<(NodeId, NodeId), GeneHasher>,

    gene_ids: Vec<NodeId>,
    sensor_ids: Vec<NodeId>,
    output_ids: Vec<NodeId>,
    hidden_ids: Vec<NodeId>,

    next_node_id: u64,
    next_innovation: u64,
    next_module_instance_id: u64,

    pub current_tick: u64,
    pub generation: u32,
    pub fitness: f64,

    /// Inert pedigree metadata (SPEC_FULL.md §4); the substrate never
    /// reads this back, it only records it for the host.
    pub parent_ids: Vec<NetworkId>,

    pub modules: Vec<ModuleInstance>,

    #[serde(skip, default = "dirty_true")]
    caches_dirty: bool,
}

impl Default for Network {
    fn default() -> Self {
        Network {
            nodes: HashMap::new(),
            connections: Vec::new(),
            catalogue_index: HashMap::default(),
            connections_by_dest: HashMap::default(),
            edge_set: HashSet::default(),
            gene_ids: Vec::new(),
            sensor_ids: Vec::new(),
            output_ids: Vec::new(),
            hidden_ids: Vec::new(),
            next_node_id: 0,
            next_innovation: 0,
            next_module_instance_id: 0,
            current_tick: 0,
            generation: 0,
            fitness: 0.0,
            parent_ids: Vec::new(),
            modules: Vec::new(),
            caches_dirty: false,
        }
    }
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    pub fn alloc_innovation(&mut self) -> InnovationId {
        let id = InnovationId(self.next_innovation);
        self.next_innovation += 1;
        id
    }

    /// Raises the next-innovation counter to at least `floor`, never
    /// lowers it (spec.md §4.7 step 5: a crossover child must start from
    /// `max(P1, P2).next_innovation` so siblings never reallocate an id
    /// already spent by either parent's lineage).
    pub fn raise_innovation_floor(&mut self, floor: InnovationId) {
        self.next_innovation = self.next_innovation.max(floor.0);
    }

    pub fn next_innovation(&self) -> InnovationId {
        InnovationId(self.next_innovation)
    }

    pub(crate) fn alloc_module_instance_id(&mut self) -> u64 {
        let id = self.next_module_instance_id;
        self.next_module_instance_id += 1;
        id
    }

    // --- accessors ----------------------------------------------------

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connections_mut(&mut self) -> &mut Vec<Connection> {
        &mut self.connections
    }

    pub fn connections_into_dest(&self, dest: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections_by_dest
            .get(&dest)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.connections[idx])
    }

    pub fn gene_ids(&self) -> &[NodeId] {
        &self.gene_ids
    }

    pub fn sensor_ids(&self) -> &[NodeId] {
        &self.sensor_ids
    }

    pub fn output_ids(&self) -> &[NodeId] {
        &self.output_ids
    }

    pub fn hidden_ids(&self) -> &[NodeId] {
        &self.hidden_ids
    }

    pub fn node_id_for_catalogue(&self, catalogue_id: CatalogueId) -> Option<NodeId> {
        self.catalogue_index.get(&catalogue_id).copied()
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.hidden_ids.contains(&id)
    }

    pub(crate) fn is_module_owned(&self, id: NodeId) -> bool {
        self.modules
            .iter()
            .any(|m| m.input_node_ids.contains(&id) || m.output_node_ids.contains(&id))
    }

    // --- construction ---------------------------------------------------

    /// Instantiates a catalogue entry; fails if already instantiated in
    /// this network (spec.md §4.4).
    pub fn add_from_catalogue(
        &mut self,
        catalogue_id: CatalogueId,
        override_bias: Option<f64>,
    ) -> BiomeResult<NodeId> {
        if self.catalogue_index.contains_key(&catalogue_id) {
            return Err(BiomeError::DuplicateCatalogueInstance(catalogue_id));
        }
        let entry = CATALOGUE
            .by_id(catalogue_id)
            .ok_or(BiomeError::UnknownCatalogueId(catalogue_id))?;

        let id = self.alloc_node_id();
        let node = CATALOGUE.instantiate(id, entry, override_bias);
        self.nodes.insert(id, node);
        self.catalogue_index.insert(catalogue_id, id);

        match entry.category {
            Category::Gene => self.gene_ids.push(id),
            Category::SensorInternal | Category::SensorExternal => self.sensor_ids.push(id),
            Category::Output => self.output_ids.push(id),
        }

        Ok(id)
    }

    /// Creates a Behavioural-affinity hidden node, `catalogue_id = None`.
    pub fn add_hidden(&mut self, activation: Activation, bias: f64) -> NodeId {
        self.add_hidden_with_affinity(Affinity::Behavioural, activation, bias)
    }

    pub fn add_hidden_with_affinity(
        &mut self,
        affinity: Affinity,
        activation: Activation,
        bias: f64,
    ) -> NodeId {
        let id = self.alloc_node_id();
        let node = Node::hidden(id, affinity, activation, bias);
        self.nodes.insert(id, node);
        self.hidden_ids.push(id);
        id
    }

    /// Rejects self-loops and duplicate ordered edges; assigns a fresh
    /// innovation id if `innovation` is `None` (spec.md §4.4).
    pub fn add_connection(
        &mut self,
        from_id: NodeId,
        to_id: NodeId,
        weight: f64,
        innovation: Option<InnovationId>,
    ) -> BiomeResult<usize> {
        if from_id == to_id {
            return Err(BiomeError::SelfLoop(from_id));
        }
        if !self.nodes.contains_key(&from_id) {
            return Err(BiomeError::NoSuchNode(from_id));
        }
        if !self.nodes.contains_key(&to_id) {
            return Err(BiomeError::NoSuchNode(to_id));
        }
        if self.edge_set.contains(&(from_id, to_id)) {
            return Err(BiomeError::DuplicateEdge(from_id, to_id));
        }

        let innovation = innovation.unwrap_or_else(|| self.alloc_innovation());
        let connection = Connection::new(from_id, to_id, weight, innovation);

        let idx = self.connections.len();
        self.connections.push(connection);
        self.edge_set.insert((from_id, to_id));
        self.connections_by_dest.entry(to_id).or_default().push(idx);

        Ok(idx)
    }

    pub fn has_edge(&self, from_id: NodeId, to_id: NodeId) -> bool {
        self.edge_set.contains(&(from_id, to_id))
    }

    /// Removes a hidden node and all incident connections. Fails for
    /// genes, sensors, outputs, and module-owned nodes (spec.md §4.4).
    pub fn remove_hidden(&mut self, node_id: NodeId) -> BiomeResult<()> {
        if !self.hidden_ids.contains(&node_id) {
            return Err(BiomeError::NotHidden(node_id));
        }
        if self.is_module_owned(node_id) {
            return Err(BiomeError::NotHidden(node_id));
        }

        self.nodes.remove(&node_id);
        self.hidden_ids.retain(|&id| id != node_id);
        self.connections
            .retain(|c| c.from_id != node_id && c.to_id != node_id);

        self.rebuild_connection_caches();
        Ok(())
    }

    /// Writes both bias and output; fails if the node is not Genetic.
    pub fn set_gene_value(&mut self, catalogue_id: CatalogueId, value: f64) -> BiomeResult<()> {
        let node_id = self
            .catalogue_index
            .get(&catalogue_id)
            .copied()
            .ok_or(BiomeError::UnknownCatalogueId(catalogue_id))?;
        let node = self.nodes.get_mut(&node_id).expect("catalogue index in sync");
        if !node.is_genetic() {
            return Err(BiomeError::NotGenetic(node_id));
        }
        node.set_gene_value(value);
        Ok(())
    }

    /// Returns the current output if instantiated, otherwise the
    /// catalogue entry's default expected value (spec.md §4.4).
    pub fn get_output(&self, catalogue_id: CatalogueId) -> f64 {
        if let Some(&node_id) = self.catalogue_index.get(&catalogue_id) {
            return self.nodes[&node_id].output;
        }
        match CATALOGUE.by_id(catalogue_id) {
            Some(entry) => CATALOGUE.default_expected_value(entry),
            None => 0.0,
        }
    }

    /// Directly writes a sensor's `output`, bypassing activation — used by
    /// the module layer and `set_sensor` (spec.md §4.8).
    pub fn write_sensor(&mut self, node_id: NodeId, value: f64) {
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.output = value;
        }
    }

    /// Full, idempotent recompute of every cache from `nodes` +
    /// `connections` (spec.md §4.4). Incremental mutators keep caches in
    /// sync on the fast path; this is the fallback used after
    /// deserialization and by `remove_hidden`.
    pub fn rebuild_caches(&mut self) {
        self.catalogue_index.clear();
        self.gene_ids.clear();
        self.sensor_ids.clear();
        self.output_ids.clear();
        self.hidden_ids.clear();

        let mut nodes: Vec<_> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.id);

        for node in nodes {
            match node.catalogue_id {
                Some(cid) => {
                    self.catalogue_index.insert(cid, node.id);
                    match CATALOGUE.by_id(cid).map(|e| e.category) {
                        Some(Category::Gene) => self.gene_ids.push(node.id),
                        Some(Category::SensorInternal) | Some(Category::SensorExternal) => {
                            self.sensor_ids.push(node.id)
                        }
                        Some(Category::Output) => self.output_ids.push(node.id),
                        None => self.hidden_ids.push(node.id),
                    }
                }
                None => self.hidden_ids.push(node.id),
            }
        }

        self.rebuild_connection_caches();
        self.caches_dirty = false;
    }

    fn rebuild_connection_caches(&mut self) {
        self.connections_by_dest.clear();
        self.edge_set.clear();
        for (idx, c) in self.connections.iter().enumerate() {
            self.edge_set.insert(c.key());
            self.connections_by_dest.entry(c.to_id).or_default().push(idx);
        }
    }

    pub(crate) fn ensure_caches(&mut self) {
        if self.caches_dirty {
            self.rebuild_caches();
        }
    }

    /// Deep copy preserving all ids and innovation numbers;
    /// `current_tick` resets to `0` (spec.md §4.4).
    pub fn spawn_clone(&self) -> Network {
        let mut clone = self.clone();
        clone.current_tick = 0;
        clone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::well_known;

    fn sample_network() -> Network {
        let mut net = Network::new();
        net.add_from_catalogue(well_known::SIZE_RATIO, None).unwrap();
        net.add_from_catalogue(well_known::PLANT_ANGLE, None).unwrap();
        net.add_from_catalogue(well_known::ROTATE, None).unwrap();
        net
    }

    #[test]
    fn duplicate_catalogue_instance_rejected() {
        let mut net = sample_network();
        let err = net.add_from_catalogue(well_known::SIZE_RATIO, None).unwrap_err();
        assert_eq!(err, BiomeError::DuplicateCatalogueInstance(well_known::SIZE_RATIO));
    }

    #[test]
    fn self_loop_rejected() {
        let mut net = sample_network();
        let a = net.node_id_for_catalogue(well_known::PLANT_ANGLE).unwrap();
        let err = net.add_connection(a, a, 1.0, None).unwrap_err();
        assert_eq!(err, BiomeError::SelfLoop(a));
    }

    #[test]
    fn duplicate_edge_rejected() {
        let mut net = sample_network();
        let a = net.node_id_for_catalogue(well_known::PLANT_ANGLE).unwrap();
        let b = net.node_id_for_catalogue(well_known::ROTATE).unwrap();
        net.add_connection(a, b, 1.0, None).unwrap();
        let err = net.add_connection(a, b, 1.0, None).unwrap_err();
        assert_eq!(err, BiomeError::DuplicateEdge(a, b));
    }

    #[test]
    fn set_gene_value_on_non_genetic_fails() {
        let mut net = sample_network();
        let err = net.set_gene_value(well_known::ROTATE, 0.5);
        // ROTATE is an output, not instantiated via catalogue_index as a gene
        assert!(err.is_err());
    }

    #[test]
    fn get_output_falls_back_to_catalogue_default() {
        let net = Network::new();
        let digestion = crate::catalogue::CATALOGUE.by_id(well_known::DIGESTION).unwrap();
        let expected = crate::catalogue::CATALOGUE.default_expected_value(digestion);
        assert_eq!(net.get_output(well_known::DIGESTION), expected);
    }

    #[test]
    fn remove_hidden_rejects_non_hidden() {
        let mut net = sample_network();
        let a = net.node_id_for_catalogue(well_known::PLANT_ANGLE).unwrap();
        assert!(net.remove_hidden(a).is_err());
    }

    #[test]
    fn remove_hidden_removes_incident_connections() {
        let mut net = sample_network();
        let a = net.node_id_for_catalogue(well_known::PLANT_ANGLE).unwrap();
        let h = net.add_hidden(Activation::TanH, 0.0);
        net.add_connection(a, h, 1.0, None).unwrap();
        assert_eq!(net.connections().len(), 1);
        net.remove_hidden(h).unwrap();
        assert_eq!(net.connections().len(), 0);
        assert!(!net.contains(h));
    }

    #[test]
    fn spawn_clone_resets_tick_but_keeps_ids() {
        let mut net = sample_network();
        net.current_tick = 42;
        let clone = net.spawn_clone();
        assert_eq!(clone.current_tick, 0);
        assert_eq!(clone.gene_ids(), net.gene_ids());
    }

    #[test]
    fn rebuild_caches_is_idempotent() {
        let mut net = sample_network();
        net.rebuild_caches();
        let genes_before = net.gene_ids().to_vec();
        net.rebuild_caches();
        assert_eq!(net.gene_ids(), genes_before.as_slice());
    }
}
