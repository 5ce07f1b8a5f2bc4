//! Process-global, lazily initialized, read-only-after-build registry of
//! node types (spec.md §4.3). Grounded on the teacher's read-only-after-
//! construction `Genes<T>` collections, globalized with `once_cell`
//! because unlike the teacher's genomes, the catalogue is not per-genome
//! state — it is one shared table every network in the process consults
//! (spec.md §9: "Single mutable shared state ... initialize-once, then
//! immutable").

mod entries;

pub use entries::well_known;

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::activations::Activation;
use crate::ids::CatalogueId;
use crate::node::{Affinity, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Gene,
    SensorInternal,
    SensorExternal,
    Output,
}

/// One immutable catalogue row.
#[derive(Debug, Clone, Copy)]
pub struct CatalogueEntry {
    pub id: CatalogueId,
    pub name: &'static str,
    pub category: Category,
    pub affinity: Affinity,
    pub default_activation: Activation,
    pub default_bias: f64,
    pub description: &'static str,
}

pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
    by_id: HashMap<CatalogueId, usize>,
}

impl Catalogue {
    fn build() -> Self {
        let entries = entries::build();
        let by_id = entries.iter().enumerate().map(|(i, e)| (e.id, i)).collect();
        Catalogue { entries, by_id }
    }

    pub fn by_id(&self, id: CatalogueId) -> Option<&CatalogueEntry> {
        self.by_id.get(&id).map(|&i| &self.entries[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&CatalogueEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CatalogueEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn all(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    /// The default expected output value for an entry, as if it had been
    /// instantiated and evaluated once from a zero accumulator (spec.md
    /// §4.4's `get_output` fallback for uninstantiated catalogue entries).
    pub fn default_expected_value(&self, entry: &CatalogueEntry) -> f64 {
        crate::activations::apply(entry.default_activation, 0.0, entry.default_bias, 0.0, 0.0)
    }

    /// Builds a fresh `Node` from this entry's defaults, as
    /// `Network::add_from_catalogue` does.
    pub fn instantiate(&self, id: crate::ids::NodeId, entry: &CatalogueEntry, override_bias: Option<f64>) -> Node {
        let bias = override_bias.unwrap_or(entry.default_bias);
        Node::from_catalogue(id, entry.id, entry.affinity, entry.default_activation, bias)
    }
}

pub static CATALOGUE: Lazy<Catalogue> = Lazy::new(Catalogue::build);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_well_known_id_succeeds() {
        let entry = CATALOGUE.by_id(well_known::SIZE_RATIO).expect("SizeRatio must exist");
        assert_eq!(entry.name, "SizeRatio");
    }

    #[test]
    fn no_duplicate_ids() {
        let mut seen = std::collections::HashSet::new();
        for e in CATALOGUE.all() {
            assert!(seen.insert(e.id), "duplicate catalogue id {:?}", e.id);
        }
    }

    #[test]
    fn gene_category_count_matches_spec_approx() {
        let genes = CATALOGUE.by_category(Category::Gene).count();
        assert_eq!(genes, 35);
    }

    #[test]
    fn output_activation_is_fixed_per_entry() {
        let accelerate = CATALOGUE.by_id(well_known::ACCELERATE).unwrap();
        assert!(matches!(accelerate.default_activation, Activation::TanH));
    }
}
