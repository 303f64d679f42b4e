use crate::constants::*;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Tunables for the physics validator. The defaults are empirical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Connector match tolerance in LDU.
    pub connector_tolerance: i32,
    /// Support ratio below which a raised piece is reported as unstable.
    pub stability_threshold: f32,
    /// Pieces with `y <= ground_clearance` are baseplate-resting.
    pub ground_clearance: i32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            connector_tolerance: CONNECTOR_TOLERANCE,
            stability_threshold: STABILITY_THRESHOLD,
            ground_clearance: GROUND_CLEARANCE,
        }
    }
}

/// Shape of one Creator build variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub subtitle: String,
    /// Fraction of the budget this variant targets.
    pub target_fraction: f64,
    /// Layer count is `max(min_layers, target / layer_divisor)`.
    pub layer_divisor: u32,
    pub min_layers: u32,
    /// Baseplate edge length in studs.
    pub baseplate_studs: i32,
    /// Horizontal placement range in grid cells, centered on the origin.
    pub grid_range: i32,
    /// Vertical cursor advance per layer, in LDU.
    pub layer_step: i32,
}

impl VariantConfig {
    /// Fewer pieces on a tight grid, plate-height layers.
    pub fn compact() -> Self {
        Self {
            name: "The Speedster".into(),
            subtitle: "Aerodynamic, sleek, lower part count".into(),
            target_fraction: 0.6,
            layer_divisor: 10,
            min_layers: 4,
            baseplate_studs: 4,
            grid_range: 3,
            layer_step: UNIT_HEIGHT_THIN,
        }
    }

    /// The full budget on a wider grid, brick-height layers.
    pub fn full() -> Self {
        Self {
            name: "The Tanker".into(),
            subtitle: "Heavy armor, complex greebling, maximum parts".into(),
            target_fraction: 1.0,
            layer_divisor: 8,
            min_layers: 6,
            baseplate_studs: 6,
            grid_range: 5,
            layer_step: UNIT_HEIGHT_FULL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorConfig {
    /// Candidate proposals per slot.
    pub max_retries: u32,
    /// Layers are abandoned once failures exceed `abandon_factor * max_retries`.
    pub abandon_factor: u32,
    /// Relative per-layer quota jitter (0.3 = ±30%).
    pub layer_jitter: f64,
    pub compact: VariantConfig,
    pub full: VariantConfig,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_PLACEMENT_RETRIES,
            abandon_factor: LAYER_ABANDON_FACTOR,
            layer_jitter: 0.3,
            compact: VariantConfig::compact(),
            full: VariantConfig::full(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Largest ring radius, in grid cells, for collision repair.
    pub max_ring_radius: i32,
    /// Face gap in LDU still counted as touching.
    pub touch_epsilon: i32,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_ring_radius: MAX_REPAIR_RING,
            touch_epsilon: TOUCH_EPSILON,
        }
    }
}

/// Top-level engine configuration. Every section is optional in RON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub physics: PhysicsConfig,
    pub creator: CreatorConfig,
    pub sanitizer: SanitizerConfig,
}

/// Parse an engine config from RON. Missing fields take their defaults.
pub fn load_config_from_str(ron_str: &str) -> Result<EngineConfig, CatalogError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| CatalogError::ConfigParseError(e.to_string()))
}
