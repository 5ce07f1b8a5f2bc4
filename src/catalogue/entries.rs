//! The literal catalogue table. One entry per row; order fixes the
//! `CatalogueId` each entry gets (its index), so reordering rows changes
//! the stable ids — don't reorder existing rows, only append.

use crate::activations::Activation;
use crate::node::Affinity;

use super::{Category, CatalogueEntry};

macro_rules! entry {
    ($id:expr, $name:expr, $category:expr, $affinity:expr, $activation:expr, $bias:expr, $description:expr) => {
        CatalogueEntry {
            id: crate::ids::CatalogueId($id),
            name: $name,
            category: $category,
            affinity: $affinity,
            default_activation: $activation,
            default_bias: $bias,
            description: $description,
        }
    };
}

/// Builds the full, ordered catalogue table. Called exactly once, from
/// behind `catalogue::CATALOGUE`'s `Lazy`.
pub(super) fn build() -> Vec<CatalogueEntry> {
    use Activation::*;
    use Affinity::*;
    use Category::*;

    vec![
        // --- Genes (35) ---------------------------------------------------
        entry!(0, "ColorR", Gene, Genetic, Identity, 0.5, "Red appearance channel"),
        entry!(1, "ColorG", Gene, Genetic, Identity, 0.5, "Green appearance channel"),
        entry!(2, "ColorB", Gene, Genetic, Identity, 0.5, "Blue appearance channel"),
        entry!(3, "HueOffset", Gene, Genetic, Identity, 0.0, "Hue offset applied on top of base color"),
        entry!(4, "SizeRatio", Gene, Genetic, Identity, 1.0, "Body size scale relative to species baseline"),
        entry!(5, "MetabolismSpeed", Gene, Genetic, Identity, 1.0, "Energy burn rate scale"),
        entry!(6, "Diet", Gene, Genetic, Identity, 0.5, "0 = strict herbivore, 1 = strict carnivore"),
        entry!(7, "MutationRateWeight", Gene, Genetic, Identity, 0.8, "Chance a connection weight mutates per mutation pass"),
        entry!(8, "MutationRateBias", Gene, Genetic, Identity, 0.3, "Chance a node bias mutates per mutation pass"),
        entry!(9, "MutationRateTopology", Gene, Genetic, Identity, 0.1, "Chance a topology-changing mutation is attempted"),
        entry!(10, "MutationVarianceWeight", Gene, Genetic, Identity, 0.5, "Standard deviation of weight jitter"),
        entry!(11, "MutationVarianceBias", Gene, Genetic, Identity, 0.3, "Standard deviation of bias jitter"),
        entry!(12, "MutationVarianceTopology", Gene, Genetic, Identity, 1.0, "Scale of topology mutation magnitude"),
        entry!(13, "ReproductionCooldown", Gene, Genetic, Identity, 5.0, "Minimum ticks between egg-laying events"),
        entry!(14, "ClutchSize", Gene, Genetic, Identity, 1.0, "Eggs produced per laying event"),
        entry!(15, "VisionRadius", Gene, Genetic, Identity, 1.0, "Vision sensor range"),
        entry!(16, "VisionAngle", Gene, Genetic, Identity, 1.0, "Vision sensor field of view"),
        entry!(17, "ClockPeriod", Gene, Genetic, Identity, 1.0, "Internal clock module period, in seconds"),
        entry!(18, "PheromoneRadius", Gene, Genetic, Identity, 1.0, "Pheromone sensing/emission range"),
        entry!(19, "HerdingWeight", Gene, Genetic, Identity, 0.0, "Baseline affinity for moving toward same-color neighbors"),
        entry!(20, "GrowthRate", Gene, Genetic, Identity, 1.0, "Body growth speed"),
        entry!(21, "GrowthCurveShape", Gene, Genetic, Identity, 0.5, "Growth curve exponent/shape parameter"),
        entry!(22, "FatStorageThreshold", Gene, Genetic, Identity, 0.8, "Fullness above which surplus energy is stored as fat"),
        entry!(23, "FatStorageDeadband", Gene, Genetic, Identity, 0.1, "Hysteresis band around the fat storage threshold"),
        entry!(24, "WagMouth", Gene, Genetic, Identity, 1.0, "Weighted apportionment: feeding organ mass share"),
        entry!(25, "WagStomach", Gene, Genetic, Identity, 1.0, "Weighted apportionment: digestive organ mass share"),
        entry!(26, "WagGonad", Gene, Genetic, Identity, 1.0, "Weighted apportionment: reproductive organ mass share"),
        entry!(27, "WagArmor", Gene, Genetic, Identity, 1.0, "Weighted apportionment: defensive organ mass share"),
        entry!(28, "WagWeapon", Gene, Genetic, Identity, 1.0, "Weighted apportionment: offensive organ mass share"),
        entry!(29, "WagPheromoneGland", Gene, Genetic, Identity, 1.0, "Weighted apportionment: signaling organ mass share"),
        entry!(30, "WagEyes", Gene, Genetic, Identity, 1.0, "Weighted apportionment: sensory organ mass share"),
        entry!(31, "EggIncubationTime", Gene, Genetic, Identity, 10.0, "Ticks an egg takes to hatch"),
        entry!(32, "ParentalInvestment", Gene, Genetic, Identity, 0.5, "Fraction of laying parent's energy transferred per egg"),
        entry!(33, "Constant_0", Gene, Genetic, Identity, 0.0, "Constant wire source, always outputs 0.0"),
        entry!(34, "Constant_1", Gene, Genetic, Identity, 1.0, "Constant wire source, always outputs 1.0"),
        // --- Internal sensors (7, Biological) -------------------------------
        entry!(35, "EnergyRatio", SensorInternal, Biological, Identity, 0.0, "Current energy over max energy"),
        entry!(36, "LifeRatio", SensorInternal, Biological, Identity, 0.0, "Current health over max health"),
        entry!(37, "Fullness", SensorInternal, Biological, Identity, 0.0, "Stomach contents over stomach capacity"),
        entry!(38, "Maturity", SensorInternal, Biological, Identity, 0.0, "Progress from birth to full maturity"),
        entry!(39, "EggCount", SensorInternal, Biological, Identity, 0.0, "Number of eggs currently carried"),
        entry!(40, "FatRatio", SensorInternal, Biological, Identity, 0.0, "Stored fat over fat capacity"),
        entry!(41, "TimeAlive", SensorInternal, Biological, Identity, 0.0, "Ticks elapsed since birth"),
        // --- External sensors (27, Behavioural) -----------------------------
        entry!(42, "OwnSpeed", SensorExternal, Behavioural, Identity, 0.0, "Current linear speed"),
        entry!(43, "OwnAngularSpeed", SensorExternal, Behavioural, Identity, 0.0, "Current angular speed"),
        entry!(44, "GrabFlag", SensorExternal, Behavioural, Identity, 0.0, "Whether this bibite is currently grabbing something"),
        entry!(45, "AttackedFlag", SensorExternal, Behavioural, Identity, 0.0, "Whether this bibite was attacked this tick"),
        entry!(46, "PlantCloseness", SensorExternal, Behavioural, Identity, 0.0, "Proximity to nearest plant"),
        entry!(47, "PlantAngle", SensorExternal, Behavioural, Identity, 0.0, "Bearing to nearest plant"),
        entry!(48, "PlantCount", SensorExternal, Behavioural, Identity, 0.0, "Plants within vision"),
        entry!(49, "MeatCloseness", SensorExternal, Behavioural, Identity, 0.0, "Proximity to nearest meat"),
        entry!(50, "MeatAngle", SensorExternal, Behavioural, Identity, 0.0, "Bearing to nearest meat"),
        entry!(51, "MeatCount", SensorExternal, Behavioural, Identity, 0.0, "Meat within vision"),
        entry!(52, "BibiteCloseness", SensorExternal, Behavioural, Identity, 0.0, "Proximity to nearest other bibite"),
        entry!(53, "BibiteAngle", SensorExternal, Behavioural, Identity, 0.0, "Bearing to nearest other bibite"),
        entry!(54, "BibiteCount", SensorExternal, Behavioural, Identity, 0.0, "Bibites within vision"),
        entry!(55, "NeighborColorR", SensorExternal, Behavioural, Identity, 0.0, "Red channel of nearest bibite's color"),
        entry!(56, "NeighborColorG", SensorExternal, Behavioural, Identity, 0.0, "Green channel of nearest bibite's color"),
        entry!(57, "NeighborColorB", SensorExternal, Behavioural, Identity, 0.0, "Blue channel of nearest bibite's color"),
        entry!(58, "TicPulse", SensorExternal, Behavioural, Identity, 0.0, "Pulses once per simulation tic"),
        entry!(59, "MinutePulse", SensorExternal, Behavioural, Identity, 0.0, "Pulses once per simulated minute"),
        entry!(60, "Pheromone0Intensity", SensorExternal, Behavioural, Identity, 0.0, "Channel 0 pheromone intensity at current position"),
        entry!(61, "Pheromone0Angle", SensorExternal, Behavioural, Identity, 0.0, "Channel 0 pheromone gradient bearing"),
        entry!(62, "Pheromone0Heading", SensorExternal, Behavioural, Identity, 0.0, "Channel 0 pheromone flow heading"),
        entry!(63, "Pheromone1Intensity", SensorExternal, Behavioural, Identity, 0.0, "Channel 1 pheromone intensity at current position"),
        entry!(64, "Pheromone1Angle", SensorExternal, Behavioural, Identity, 0.0, "Channel 1 pheromone gradient bearing"),
        entry!(65, "Pheromone1Heading", SensorExternal, Behavioural, Identity, 0.0, "Channel 1 pheromone flow heading"),
        entry!(66, "Pheromone2Intensity", SensorExternal, Behavioural, Identity, 0.0, "Channel 2 pheromone intensity at current position"),
        entry!(67, "Pheromone2Angle", SensorExternal, Behavioural, Identity, 0.0, "Channel 2 pheromone gradient bearing"),
        entry!(68, "Pheromone2Heading", SensorExternal, Behavioural, Identity, 0.0, "Channel 2 pheromone flow heading"),
        // --- Outputs (15, Behavioural, fixed activation) --------------------
        entry!(69, "Accelerate", Output, Behavioural, TanH, 0.45, "Forward/backward thrust"),
        entry!(70, "Rotate", Output, Behavioural, TanH, 0.0, "Turning rate"),
        entry!(71, "Herding", Output, Behavioural, TanH, 0.0, "Attraction/repulsion toward same-color neighbors"),
        entry!(72, "EggProduction", Output, Behavioural, TanH, 0.2, "Egg-laying drive"),
        entry!(73, "WantToLay", Output, Behavioural, Sigmoid, 0.0, "Egg-laying gate"),
        entry!(74, "WantToEat", Output, Behavioural, TanH, 1.23, "Eating drive"),
        entry!(75, "Digestion", Output, Behavioural, Sigmoid, -2.07, "Digestion rate gate"),
        entry!(76, "Grab", Output, Behavioural, TanH, 0.0, "Grab drive"),
        entry!(77, "WantToAttack", Output, Behavioural, Sigmoid, 0.0, "Attack drive"),
        entry!(78, "WantToGrow", Output, Behavioural, Sigmoid, 0.0, "Growth-investment drive"),
        entry!(79, "WantToHeal", Output, Behavioural, Sigmoid, 0.0, "Healing-investment drive"),
        entry!(80, "ClockReset", Output, Behavioural, Sigmoid, 0.0, "Resets the internal clock module"),
        entry!(81, "Pheromone0Emit", Output, Behavioural, ReLU, 0.0, "Channel 0 pheromone emission rate"),
        entry!(82, "Pheromone1Emit", Output, Behavioural, ReLU, 0.0, "Channel 1 pheromone emission rate"),
        entry!(83, "Pheromone2Emit", Output, Behavioural, ReLU, 0.0, "Channel 2 pheromone emission rate"),
    ]
}

/// Stable, well-known ids referenced by the starter builder, the module
/// layer and the test suite. Values must match the row index in `build()`.
pub mod well_known {
    use crate::ids::CatalogueId;

    pub const SIZE_RATIO: CatalogueId = CatalogueId(4);
    pub const METABOLISM_SPEED: CatalogueId = CatalogueId(5);
    pub const DIET: CatalogueId = CatalogueId(6);
    pub const CLOCK_PERIOD: CatalogueId = CatalogueId(17);
    pub const CONSTANT_0: CatalogueId = CatalogueId(33);
    pub const CONSTANT_1: CatalogueId = CatalogueId(34);

    pub const ENERGY_RATIO: CatalogueId = CatalogueId(35);
    pub const FULLNESS: CatalogueId = CatalogueId(37);

    pub const PLANT_CLOSENESS: CatalogueId = CatalogueId(46);
    pub const PLANT_ANGLE: CatalogueId = CatalogueId(47);

    pub const ACCELERATE: CatalogueId = CatalogueId(69);
    pub const ROTATE: CatalogueId = CatalogueId(70);
    pub const HERDING: CatalogueId = CatalogueId(71);
    pub const EGG_PRODUCTION: CatalogueId = CatalogueId(72);
    pub const WANT_TO_LAY: CatalogueId = CatalogueId(73);
    pub const WANT_TO_EAT: CatalogueId = CatalogueId(74);
    pub const DIGESTION: CatalogueId = CatalogueId(75);
    pub const GRAB: CatalogueId = CatalogueId(76);
    pub const WANT_TO_ATTACK: CatalogueId = CatalogueId(77);
    pub const WANT_TO_GROW: CatalogueId = CatalogueId(78);
    pub const WANT_TO_HEAL: CatalogueId = CatalogueId(79);
    pub const CLOCK_RESET: CatalogueId = CatalogueId(80);
    pub const PHEROMONE_0_EMIT: CatalogueId = CatalogueId(81);
}
