//! Newtype identifiers, following the teacher's `genes::Id(pub u64)`
//! pattern: a `Copy` tuple struct per namespace instead of a bare integer,
//! so a `NodeId` can never be passed where an `InnovationId` is expected.

use serde::{Deserialize, Serialize};

/// Dense integer identifying a node, unique and stable within one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Monotonic integer identifying a connection's lineage across networks.
/// Two connections in different networks sharing an `InnovationId` are
/// homologous for crossover purposes (spec.md §3, §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InnovationId(pub u64);

/// Stable identifier of a catalogue entry. Unlike `NodeId`/`InnovationId`
/// these are not generated per-network; they are the fixed keys assigned
/// to catalogue entries at build time and are the ones that must survive
/// across versions in a serialized network (spec.md §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogueId(pub u32);

/// Identifies one network across a lineage, used only for the inert
/// `Network::parent_ids` pedigree metadata (SPEC_FULL.md §4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub u64);
