use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

/// Per-call rates for every mutation operator (spec.md §4.6). Loaded via
/// the `config` crate the same way the teacher loads its `Parameters`,
/// so a host can tune evolution pressure from a TOML/YAML file without a
/// recompile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MutationConfig {
    pub weight_shift: f64,
    pub weight_randomize: f64,
    pub connection_toggle: f64,
    pub connection_add: f64,
    pub node_add_split: f64,
    pub node_remove: f64,
    pub bias_shift: f64,
    pub affinity_shift: f64,
    pub activation_change: f64,
    pub add_interface_node: f64,
    pub module_duplicate: f64,
    pub module_tier_upgrade: f64,
    pub modularization: f64,
    pub mutate_genes: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        MutationConfig {
            weight_shift: 0.80,
            weight_randomize: 0.10,
            connection_toggle: 0.05,
            connection_add: 0.15,
            node_add_split: 0.03,
            node_remove: 0.01,
            bias_shift: 0.30,
            affinity_shift: 0.10,
            activation_change: 0.05,
            add_interface_node: 0.05,
            module_duplicate: 0.005,
            module_tier_upgrade: 0.01,
            modularization: 0.001,
            mutate_genes: false,
        }
    }
}

impl MutationConfig {
    /// Loads rates from a TOML/YAML/JSON file at `path`, falling back to
    /// any field `Default` leaves unset. Mirrors the teacher's
    /// `Parameters::new`, which merges a named config file over its own
    /// `Config::new()` base via the `config` crate.
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let mut s = Config::new();
        s.merge(File::with_name(path))?;
        s.try_into()
    }
}
