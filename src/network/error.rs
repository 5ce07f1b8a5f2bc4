use thiserror::Error;

use crate::ids::{CatalogueId, NodeId};

/// Construction/mutation-time errors (spec.md §7's `GraphInvariant` and
/// `UnknownCatalogueId`). Every variant here means the attempted operation
/// was a no-op: the network is left exactly as it was before the call,
/// mirroring the teacher's `MutationError` contract of never leaving the
/// genome half-mutated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiomeError {
    #[error("catalogue id {0:?} is already instantiated in this network")]
    DuplicateCatalogueInstance(CatalogueId),
    #[error("catalogue id {0:?} is not present in the catalogue")]
    UnknownCatalogueId(CatalogueId),
    #[error("node {0:?} is not a hidden node and cannot be removed")]
    NotHidden(NodeId),
    #[error("a connection cannot start and end at the same node ({0:?})")]
    SelfLoop(NodeId),
    #[error("a connection from {0:?} to {1:?} already exists")]
    DuplicateEdge(NodeId, NodeId),
    #[error("node {0:?} does not exist in this network")]
    NoSuchNode(NodeId),
    #[error("node {0:?} is not a Genetic node")]
    NotGenetic(NodeId),
}

pub type BiomeResult<T> = Result<T, BiomeError>;
