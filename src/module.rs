//! The binding layer between a network's interface nodes and a host
//! subsystem (spec.md §4.8). spec.md §9 resolves the teacher's own "duck-
//! typed module callbacks" into "simple dispatch by module-definition id
//! in a systems-language implementation ... a small table indexed by
//! definition id" — that's exactly what `FUNCTIONAL_PROCESSORS` below is.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::activations::Activation;
use crate::ids::NodeId;
use crate::network::Network;
use crate::node::Affinity;

/// Stable identifier of a module *definition* (the static template), as
/// opposed to a per-network module *instance*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleDefinitionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleKind {
    Input,
    Output,
    Functional,
    Meta,
}

/// One declared interface node: the affinity/activation/bias a module's
/// input or output slot expects when it is instantiated.
#[derive(Debug, Clone, Copy)]
pub struct SlotDeclaration {
    pub name: &'static str,
    pub affinity: Affinity,
    pub activation: Activation,
    pub default_bias: f64,
}

/// A static module template: what slots it declares, whether it may be
/// duplicated, and — for `Functional` modules — which processor runs it.
pub struct ModuleDefinition {
    pub id: ModuleDefinitionId,
    pub name: &'static str,
    pub kind: ModuleKind,
    pub max_tier: u8,
    pub input_slots: &'static [SlotDeclaration],
    pub output_slots: &'static [SlotDeclaration],
    /// Extra output slots unlocked when upgraded to tier 2 (spec.md §4.6
    /// "Module tier upgrade"; only `Clock` uses this, see DESIGN.md).
    pub tier2_output_slots: &'static [SlotDeclaration],
    /// `false` for the singleton body-state modules (Energy, Health,
    /// Maturity, Stomach) per spec.md §4.6 "Module duplicate".
    pub duplication_eligible: bool,
}

/// A live binding: which network node ids realize a definition's declared
/// slots for one agent. Not a node container — per spec.md §3, modules
/// hold ids, the nodes themselves live in `Network`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInstance {
    pub instance_id: u64,
    pub definition_id: ModuleDefinitionId,
    pub tier: u8,
    pub input_node_ids: Vec<NodeId>,
    pub output_node_ids: Vec<NodeId>,
    /// Opaque internal state a Functional module's `process` callback
    /// keeps between ticks (e.g. the clock's elapsed-time accumulator).
    pub state: HashMap<String, f64>,
}

const CLOCK_INPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "En", affinity: Affinity::Behavioural, activation: Activation::Identity, default_bias: 1.0 },
    SlotDeclaration { name: "Period", affinity: Affinity::Behavioural, activation: Activation::Identity, default_bias: 1.0 },
];
const CLOCK_OUTPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "Tic", affinity: Affinity::Behavioural, activation: Activation::Identity, default_bias: 0.0 },
];
const CLOCK_TIER2_OUTPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "Phase", affinity: Affinity::Behavioural, activation: Activation::Identity, default_bias: 0.0 },
];

const ENERGY_OUTPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "EnergyRatio", affinity: Affinity::Biological, activation: Activation::Identity, default_bias: 0.0 },
];
const HEALTH_OUTPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "LifeRatio", affinity: Affinity::Biological, activation: Activation::Identity, default_bias: 0.0 },
];
const MATURITY_OUTPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "Maturity", affinity: Affinity::Biological, activation: Activation::Identity, default_bias: 0.0 },
];
const STOMACH_OUTPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "Fullness", affinity: Affinity::Biological, activation: Activation::Identity, default_bias: 0.0 },
];

const VISION_OUTPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "Closeness", affinity: Affinity::Behavioural, activation: Activation::Identity, default_bias: 0.0 },
    SlotDeclaration { name: "Angle", affinity: Affinity::Behavioural, activation: Activation::Identity, default_bias: 0.0 },
];

const LOCOMOTION_INPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "Accelerate", affinity: Affinity::Behavioural, activation: Activation::TanH, default_bias: 0.45 },
    SlotDeclaration { name: "Rotate", affinity: Affinity::Behavioural, activation: Activation::TanH, default_bias: 0.0 },
];

const PHEROMONE_EMITTER_INPUTS: &[SlotDeclaration] = &[
    SlotDeclaration { name: "Emit", affinity: Affinity::Behavioural, activation: Activation::ReLU, default_bias: 0.0 },
];

pub const ENERGY: ModuleDefinitionId = ModuleDefinitionId(0);
pub const HEALTH: ModuleDefinitionId = ModuleDefinitionId(1);
pub const MATURITY: ModuleDefinitionId = ModuleDefinitionId(2);
pub const STOMACH: ModuleDefinitionId = ModuleDefinitionId(3);
pub const VISION: ModuleDefinitionId = ModuleDefinitionId(4);
pub const LOCOMOTION: ModuleDefinitionId = ModuleDefinitionId(5);
pub const CLOCK: ModuleDefinitionId = ModuleDefinitionId(6);
pub const PHEROMONE_EMITTER: ModuleDefinitionId = ModuleDefinitionId(7);
/// Not instantiated via `instantiate()` — a Meta module's interface is
/// whatever cluster `modularization` wraps, so it has no static slots.
/// See `instantiate_meta`.
pub const META: ModuleDefinitionId = ModuleDefinitionId(8);

fn build_definitions() -> Vec<ModuleDefinition> {
    vec![
        ModuleDefinition {
            id: ENERGY,
            name: "Energy",
            kind: ModuleKind::Input,
            max_tier: 1,
            input_slots: &[],
            output_slots: ENERGY_OUTPUTS,
            tier2_output_slots: &[],
            duplication_eligible: false,
        },
        ModuleDefinition {
            id: HEALTH,
            name: "Health",
            kind: ModuleKind::Input,
            max_tier: 1,
            input_slots: &[],
            output_slots: HEALTH_OUTPUTS,
            tier2_output_slots: &[],
            duplication_eligible: false,
        },
        ModuleDefinition {
            id: MATURITY,
            name: "Maturity",
            kind: ModuleKind::Input,
            max_tier: 1,
            input_slots: &[],
            output_slots: MATURITY_OUTPUTS,
            tier2_output_slots: &[],
            duplication_eligible: false,
        },
        ModuleDefinition {
            id: STOMACH,
            name: "Stomach",
            kind: ModuleKind::Input,
            max_tier: 1,
            input_slots: &[],
            output_slots: STOMACH_OUTPUTS,
            tier2_output_slots: &[],
            duplication_eligible: false,
        },
        ModuleDefinition {
            id: VISION,
            name: "Vision",
            kind: ModuleKind::Input,
            max_tier: 1,
            input_slots: &[],
            output_slots: VISION_OUTPUTS,
            tier2_output_slots: &[],
            duplication_eligible: true,
        },
        ModuleDefinition {
            id: LOCOMOTION,
            name: "Locomotion",
            kind: ModuleKind::Output,
            max_tier: 1,
            input_slots: LOCOMOTION_INPUTS,
            output_slots: &[],
            tier2_output_slots: &[],
            duplication_eligible: false,
        },
        ModuleDefinition {
            id: CLOCK,
            name: "Clock",
            kind: ModuleKind::Functional,
            max_tier: 2,
            input_slots: CLOCK_INPUTS,
            output_slots: CLOCK_OUTPUTS,
            tier2_output_slots: CLOCK_TIER2_OUTPUTS,
            duplication_eligible: true,
        },
        ModuleDefinition {
            id: PHEROMONE_EMITTER,
            name: "PheromoneEmitter",
            kind: ModuleKind::Output,
            max_tier: 1,
            input_slots: PHEROMONE_EMITTER_INPUTS,
            output_slots: &[],
            tier2_output_slots: &[],
            duplication_eligible: true,
        },
        ModuleDefinition {
            id: META,
            name: "Meta",
            kind: ModuleKind::Meta,
            max_tier: 1,
            input_slots: &[],
            output_slots: &[],
            tier2_output_slots: &[],
            duplication_eligible: false,
        },
    ]
}

pub static MODULE_DEFINITIONS: Lazy<Vec<ModuleDefinition>> = Lazy::new(build_definitions);

pub fn definition(id: ModuleDefinitionId) -> Option<&'static ModuleDefinition> {
    MODULE_DEFINITIONS.iter().find(|d| d.id == id)
}

/// Binds a definition to `network`: creates its interface nodes as fresh
/// hidden-class ids owned by the instance, and records their ids.
pub fn instantiate(network: &mut Network, definition_id: ModuleDefinitionId) -> ModuleInstance {
    let def = definition(definition_id).expect("known module definition id");

    let input_node_ids = def
        .input_slots
        .iter()
        .map(|slot| network.add_hidden_with_affinity(slot.affinity, slot.activation, slot.default_bias))
        .collect();
    let output_node_ids = def
        .output_slots
        .iter()
        .map(|slot| network.add_hidden_with_affinity(slot.affinity, slot.activation, slot.default_bias))
        .collect();

    ModuleInstance {
        instance_id: network.alloc_module_instance_id(),
        definition_id,
        tier: 1,
        input_node_ids,
        output_node_ids,
        state: HashMap::new(),
    }
}

/// Wraps an already-existing cluster of hidden nodes in a Meta module
/// (spec.md §4.6 "Modularization"). Unlike `instantiate`, this records
/// ownership of nodes that already exist rather than creating fresh ones
/// — modularization "does not rewire anything; it only records
/// ownership".
pub fn instantiate_meta(network: &mut Network, input_node_ids: Vec<NodeId>, output_node_ids: Vec<NodeId>) -> ModuleInstance {
    ModuleInstance {
        instance_id: network.alloc_module_instance_id(),
        definition_id: META,
        tier: 1,
        input_node_ids,
        output_node_ids,
        state: HashMap::new(),
    }
}

/// Increments `instance.tier` and creates the tier's extra output nodes,
/// if the instance is below its definition's maximum tier (spec.md §4.6
/// "Module tier upgrade").
pub fn tier_upgrade(network: &mut Network, instance: &mut ModuleInstance) -> bool {
    let def = definition(instance.definition_id).expect("known module definition id");
    if instance.tier >= def.max_tier {
        return false;
    }
    instance.tier += 1;
    for slot in def.tier2_output_slots {
        let id = network.add_hidden_with_affinity(slot.affinity, slot.activation, slot.default_bias);
        instance.output_node_ids.push(id);
    }
    true
}

/// Host write: a sensor reading into `instance.output_node_ids[slot_index]`,
/// bypassing activation (spec.md §4.8). Must happen before `process`.
pub fn set_module_output(network: &mut Network, instance: &ModuleInstance, slot_index: usize, value: f64) {
    if let Some(&node_id) = instance.output_node_ids.get(slot_index) {
        network.write_sensor(node_id, value);
    }
}

/// Host read: the current output of `instance.input_node_ids[slot_index]`,
/// to drive an actuator. Must happen after `process`.
pub fn get_module_input(network: &Network, instance: &ModuleInstance, slot_index: usize) -> f64 {
    instance
        .input_node_ids
        .get(slot_index)
        .and_then(|&id| network.get(id))
        .map(|n| n.output)
        .unwrap_or(0.0)
}

/// Runs a Functional module's tick logic, inside the evaluator after
/// propagation but before the final activate pass (spec.md §4.8).
/// Dispatch is a match over the definition id — the systems-language
/// answer spec.md §9 calls for in place of a duck-typed callable.
pub fn process(instance: &mut ModuleInstance, network: &mut Network, dt: f64) {
    if instance.definition_id == CLOCK {
        process_clock(instance, network, dt);
    }
}

fn process_clock(instance: &mut ModuleInstance, network: &mut Network, dt: f64) {
    let en = get_module_input(network, instance, 0);
    let period = get_module_input(network, instance, 1).max(0.001);

    let elapsed = instance.state.entry("elapsed".to_string()).or_insert(0.0);
    if en > 0.5 {
        *elapsed += dt;
    }

    if *elapsed >= period {
        *elapsed -= period;
        if let Some(&tic_id) = instance.output_node_ids.first() {
            network.write_sensor(tic_id, 1.0);
        }
    } else if let Some(&tic_id) = instance.output_node_ids.first() {
        network.write_sensor(tic_id, 0.0);
    }

    if instance.tier >= 2 {
        if let Some(&phase_id) = instance.output_node_ids.get(1) {
            network.write_sensor(phase_id, *elapsed / period);
        }
    }
}
